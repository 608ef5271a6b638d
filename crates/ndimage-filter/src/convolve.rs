//! Weighted-sum filters
//!
//! Correlation and convolution with arbitrary N-d weights, their 1-d forms,
//! and the separable uniform and Gaussian filters.
//!
//! All weighted sums are accumulated in `f64`. Separable filters keep their
//! intermediate passes in `f64` and convert once, into the result dtype,
//! after the last pass.

use crate::kernel::{DEFAULT_TRUNCATE, gaussian_kernel1d, gaussian_radius, is_integral};
use crate::line::{LinePass, apply_lines, correlate_line, uniform_line};
use crate::window::{Extend, apply_window};
use crate::{FilterError, FilterResult};
use ndarray::{ArrayD, ArrayViewD};
use ndimage_core::{
    BoundaryMode, Error, FilterOptions, NdArray, Neighbourhood, PerAxis, normalize_axis,
    validate_origin,
};

/// Boundary mode and origin of every axis.
pub(crate) fn axis_settings(
    opts: &FilterOptions,
    ndim: usize,
) -> FilterResult<(Vec<BoundaryMode>, Vec<isize>)> {
    Ok((opts.mode.expand(ndim)?, opts.origin.expand(ndim)?))
}

/// Check a 1-d origin, reporting the axis it belongs to.
pub(crate) fn check_origin(axis: usize, size: usize, origin: isize) -> FilterResult<()> {
    validate_origin(&[size], &[origin])
        .map_err(|_| Error::OriginOutOfBounds { axis, origin, size }.into())
}

/// Origin of the reversed kernel that makes a correlation a convolution.
pub(crate) fn convolve_origin(size: usize, origin: isize) -> isize {
    if size % 2 == 0 { -origin - 1 } else { -origin }
}

/// One correlation pass along `axis` in `f64`.
pub(crate) fn correlate_pass(
    data: ArrayViewD<'_, f64>,
    weights: &[f64],
    axis: usize,
    origin: isize,
    mode: BoundaryMode,
    cval: f64,
) -> ArrayD<f64> {
    let pass = LinePass {
        axis,
        size: weights.len(),
        origin,
        mode,
        cval,
    };
    apply_lines(data, &pass, |ext, out| correlate_line(ext, weights, out))
}

fn weighted_sum1d(
    input: &NdArray,
    weights: &[f64],
    axis: isize,
    opts: &FilterOptions,
    reverse: bool,
) -> FilterResult<NdArray> {
    if weights.is_empty() {
        return Err(FilterError::InvalidKernel("no filter weights given".to_string()));
    }
    let ndim = input.ndim();
    let axis = normalize_axis(axis, ndim)?;
    let (modes, origins) = axis_settings(opts, ndim)?;
    let size = weights.len();
    check_origin(axis, size, origins[axis])?;
    let target =
        opts.output
            .weighted_target(input.shape(), input.dtype(), is_integral(weights))?;

    let (weights, origin) = if reverse {
        let reversed: Vec<f64> = weights.iter().rev().copied().collect();
        (reversed, convolve_origin(size, origins[axis]))
    } else {
        (weights.to_vec(), origins[axis])
    };

    let data = input.to_f64();
    let out = correlate_pass(data.view(), &weights, axis, origin, modes[axis], opts.cval);
    Ok(opts.output.clone().deliver(NdArray::from_f64(out, target)))
}

/// One-dimensional correlation along `axis`.
///
/// `out[i] = sum_k weights[k] * in[i + k - (len / 2 + origin)]`, using the
/// boundary mode and origin of that axis.
///
/// # Errors
///
/// - [`FilterError::InvalidKernel`] for empty weights
/// - [`Error::AxisOutOfRange`] / [`Error::OriginOutOfBounds`]
/// - [`Error::DtypeMismatch`] if a `bool` output is requested
pub fn correlate1d(
    input: &NdArray,
    weights: &[f64],
    axis: isize,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    weighted_sum1d(input, weights, axis, opts, false)
}

/// One-dimensional convolution along `axis`.
///
/// Identical to [`correlate1d`] with the weights reversed and the origin
/// mirrored (shifted by one more for even lengths).
pub fn convolve1d(
    input: &NdArray,
    weights: &[f64],
    axis: isize,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    weighted_sum1d(input, weights, axis, opts, true)
}

fn weighted_sum(
    input: &NdArray,
    weights: &ArrayD<f64>,
    opts: &FilterOptions,
    reverse: bool,
) -> FilterResult<NdArray> {
    let ndim = input.ndim();
    let mode = opts.single_mode()?;
    let hood = Neighbourhood::from_weights(weights.view(), ndim, &opts.origin)?;
    let hood = if reverse { hood.reflected() } else { hood };
    let target = opts.output.weighted_target(
        input.shape(),
        input.dtype(),
        is_integral(weights.iter()),
    )?;
    log::debug!(
        "weighted sum over {} of {} kernel positions, mode {mode}",
        hood.len(),
        weights.len()
    );

    let data = input.to_f64();
    let edge = Extend {
        mode,
        cval: opts.cval,
    };
    let values = hood.values();
    let out = apply_window(data.view(), &hood, &edge, |samples| {
        samples.iter().zip(values).map(|(s, w)| s * w).sum::<f64>()
    })?;
    Ok(opts.output.clone().deliver(NdArray::from_f64(out, target)))
}

/// N-d correlation with `weights`, whose rank must equal the input rank.
///
/// Zero weights are skipped. A single boundary mode applies to every axis.
pub fn correlate(
    input: &NdArray,
    weights: &ArrayD<f64>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    weighted_sum(input, weights, opts, false)
}

/// N-d convolution with `weights`.
///
/// Equal, element for element, to [`correlate`] with `weights` reversed
/// along every axis and the origin mirrored.
pub fn convolve(
    input: &NdArray,
    weights: &ArrayD<f64>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    weighted_sum(input, weights, opts, true)
}

fn uniform_pass(data: ArrayViewD<'_, f64>, pass: &LinePass<f64>) -> ArrayD<f64> {
    let size = pass.size;
    apply_lines(data, pass, |ext, out| uniform_line(ext, size, out))
}

/// Mean over `size` consecutive elements along `axis`.
pub fn uniform_filter1d(
    input: &NdArray,
    size: usize,
    axis: isize,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    if size == 0 {
        return Err(FilterError::InvalidParameters(
            "uniform filter size must be at least 1".to_string(),
        ));
    }
    let ndim = input.ndim();
    let axis = normalize_axis(axis, ndim)?;
    let (modes, origins) = axis_settings(opts, ndim)?;
    check_origin(axis, size, origins[axis])?;
    let target = opts
        .output
        .weighted_target(input.shape(), input.dtype(), size == 1)?;

    let data = input.to_f64();
    let pass = LinePass {
        axis,
        size,
        origin: origins[axis],
        mode: modes[axis],
        cval: opts.cval,
    };
    let out = uniform_pass(data.view(), &pass);
    Ok(opts.output.clone().deliver(NdArray::from_f64(out, target)))
}

/// Box mean with a per-axis size, applied as one running-mean pass per
/// axis. Axes with size 1 are left untouched.
pub fn uniform_filter(
    input: &NdArray,
    size: impl Into<PerAxis<usize>>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let ndim = input.ndim();
    let sizes = size.into().expand(ndim)?;
    if sizes.contains(&0) {
        return Err(FilterError::InvalidParameters(format!(
            "uniform filter size must be at least 1 on every axis, got {sizes:?}"
        )));
    }
    let (modes, origins) = axis_settings(opts, ndim)?;
    for (axis, &size) in sizes.iter().enumerate() {
        if size > 1 {
            check_origin(axis, size, origins[axis])?;
        }
    }
    let target = opts.output.weighted_target(
        input.shape(),
        input.dtype(),
        sizes.iter().all(|&s| s <= 1),
    )?;

    let mut data = input.to_f64();
    for (axis, &size) in sizes.iter().enumerate() {
        if size <= 1 {
            continue;
        }
        let pass = LinePass {
            axis,
            size,
            origin: origins[axis],
            mode: modes[axis],
            cval: opts.cval,
        };
        data = uniform_pass(data.view(), &pass);
    }
    Ok(opts.output.clone().deliver(NdArray::from_f64(data, target)))
}

struct GaussianAxis {
    axis: usize,
    sigma: f64,
    order: usize,
}

fn gaussian_passes(
    input: &NdArray,
    axes: &[GaussianAxis],
    truncate: f64,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let ndim = input.ndim();
    let (modes, origins) = axis_settings(opts, ndim)?;

    let mut kernels = Vec::new();
    for spec in axes {
        if spec.sigma.is_nan() || spec.sigma < 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian sigma must not be negative, got {}",
                spec.sigma
            )));
        }
        if spec.sigma <= 1e-15 {
            continue;
        }
        let radius = gaussian_radius(spec.sigma, truncate);
        let mut weights = gaussian_kernel1d(spec.sigma, spec.order, radius)?;
        weights.reverse();
        check_origin(spec.axis, weights.len(), origins[spec.axis])?;
        kernels.push((spec.axis, weights));
    }

    let target = opts
        .output
        .weighted_target(input.shape(), input.dtype(), kernels.is_empty())?;

    let mut data = input.to_f64();
    for (axis, weights) in &kernels {
        data = correlate_pass(
            data.view(),
            weights,
            *axis,
            origins[*axis],
            modes[*axis],
            opts.cval,
        );
    }
    Ok(opts.output.clone().deliver(NdArray::from_f64(data, target)))
}

/// Gaussian smoothing, or a derivative of it, along one axis.
///
/// `order` 0 smooths; `order` n convolves with the n-th derivative of the
/// Gaussian. The kernel extends `truncate` standard deviations each side.
/// A sigma of (almost) zero leaves the data unchanged.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for a negative sigma.
pub fn gaussian_filter1d(
    input: &NdArray,
    sigma: f64,
    axis: isize,
    order: usize,
    truncate: f64,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let axis = normalize_axis(axis, input.ndim())?;
    gaussian_passes(input, &[GaussianAxis { axis, sigma, order }], truncate, opts)
}

/// Multidimensional Gaussian filter as a sequence of 1-d passes, one per
/// axis, each with its own sigma and derivative order.
pub fn gaussian_filter(
    input: &NdArray,
    sigma: impl Into<PerAxis<f64>>,
    order: impl Into<PerAxis<usize>>,
    truncate: f64,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let ndim = input.ndim();
    let sigmas = sigma.into().expand(ndim)?;
    let orders = order.into().expand(ndim)?;
    let axes: Vec<GaussianAxis> = sigmas
        .into_iter()
        .zip(orders)
        .enumerate()
        .map(|(axis, (sigma, order))| GaussianAxis { axis, sigma, order })
        .collect();
    gaussian_passes(input, &axes, truncate, opts)
}

/// [`gaussian_filter`] with order 0 and the default truncation.
pub fn gaussian_smooth(
    input: &NdArray,
    sigma: impl Into<PerAxis<f64>>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    gaussian_filter(input, sigma, 0usize, DEFAULT_TRUNCATE, opts)
}
