//! One-dimensional filter kernels
//!
//! Weight vectors for the separable filters. N-d kernels are plain
//! `ndarray` arrays and need no dedicated type.

use crate::{FilterError, FilterResult};

/// Central difference `[-1, 0, 1]`.
pub const DERIVATIVE: [f64; 3] = [-1.0, 0.0, 1.0];

/// Second difference `[1, -2, 1]`.
pub const SECOND_DERIVATIVE: [f64; 3] = [1.0, -2.0, 1.0];

/// Prewitt smoothing `[1, 1, 1]`.
pub const PREWITT_SMOOTH: [f64; 3] = [1.0, 1.0, 1.0];

/// Sobel smoothing `[1, 2, 1]`.
pub const SOBEL_SMOOTH: [f64; 3] = [1.0, 2.0, 1.0];

/// Default truncation of Gaussian kernels, in standard deviations.
pub const DEFAULT_TRUNCATE: f64 = 4.0;

/// Check if every weight is a whole number.
pub fn is_integral<'a>(weights: impl IntoIterator<Item = &'a f64>) -> bool {
    weights.into_iter().all(|w| w.fract() == 0.0)
}

/// Radius of a Gaussian kernel: `int(truncate * sigma + 0.5)`.
pub fn gaussian_radius(sigma: f64, truncate: f64) -> usize {
    (truncate * sigma + 0.5) as usize
}

/// Sampled Gaussian, or derivative of a Gaussian, of length `2 * radius + 1`.
///
/// For `order == 0` the weights are `phi(x)` normalized to unit sum. For
/// higher orders they are `q(x) * phi(x)`, where the polynomial `q` starts
/// at `1` and is replaced `order` times by `q' - x q / sigma^2`, i.e. the
/// coefficients follow `q[i] <- (i + 1) q[i + 1] - q[i - 1] / sigma^2`.
///
/// The kernel is indexed by `x = -radius ..= radius` and is meant to be
/// applied by convolution; correlate with the reversed vector.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `sigma > 0`.
pub fn gaussian_kernel1d(sigma: f64, order: usize, radius: usize) -> FilterResult<Vec<f64>> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "gaussian sigma must be positive, got {sigma}"
        )));
    }
    let sigma2 = sigma * sigma;
    let r = radius as isize;
    let xs: Vec<f64> = (-r..=r).map(|x| x as f64).collect();

    let mut phi: Vec<f64> = xs.iter().map(|x| (-0.5 / sigma2 * x * x).exp()).collect();
    let total: f64 = phi.iter().sum();
    for p in &mut phi {
        *p /= total;
    }
    if order == 0 {
        return Ok(phi);
    }

    let mut q = vec![0.0; order + 1];
    q[0] = 1.0;
    for _ in 0..order {
        let prev = q.clone();
        for i in 0..=order {
            let up = if i < order { (i + 1) as f64 * prev[i + 1] } else { 0.0 };
            let down = if i > 0 { prev[i - 1] / sigma2 } else { 0.0 };
            q[i] = up - down;
        }
    }

    Ok(xs
        .iter()
        .zip(&phi)
        .map(|(&x, &p)| {
            let poly: f64 = q.iter().rev().fold(0.0, |acc, &c| acc * x + c);
            poly * p
        })
        .collect())
}
