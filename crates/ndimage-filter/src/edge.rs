//! Derivative filters
//!
//! Prewitt and Sobel gradients, Laplace operators and Gaussian derivative
//! magnitudes. Every pass uses the boundary mode of its own axis and a
//! centred origin.

use crate::convolve::{correlate1d, correlate_pass, gaussian_filter};
use crate::kernel::{DEFAULT_TRUNCATE, DERIVATIVE, PREWITT_SMOOTH, SECOND_DERIVATIVE, SOBEL_SMOOTH};
use crate::FilterResult;
use ndarray::ArrayD;
use ndimage_core::{FilterOptions, NdArray, Output, PerAxis, normalize_axis};

fn smoothed_derivative(
    input: &NdArray,
    axis: isize,
    smooth: &[f64],
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let ndim = input.ndim();
    let axis = normalize_axis(axis, ndim)?;
    let modes = opts.mode.expand(ndim)?;
    let target = opts
        .output
        .weighted_target(input.shape(), input.dtype(), true)?;

    let mut data = input.to_f64();
    data = correlate_pass(data.view(), &DERIVATIVE, axis, 0, modes[axis], opts.cval);
    for other in (0..ndim).filter(|&d| d != axis) {
        data = correlate_pass(data.view(), smooth, other, 0, modes[other], opts.cval);
    }
    Ok(opts.output.clone().deliver(NdArray::from_f64(data, target)))
}

/// Prewitt gradient along `axis`: `[-1, 0, 1]` along the axis, `[1, 1, 1]`
/// smoothing along every other axis.
pub fn prewitt(input: &NdArray, axis: isize, opts: &FilterOptions) -> FilterResult<NdArray> {
    smoothed_derivative(input, axis, &PREWITT_SMOOTH, opts)
}

/// Sobel gradient along `axis`: `[-1, 0, 1]` along the axis, `[1, 2, 1]`
/// smoothing along every other axis.
pub fn sobel(input: &NdArray, axis: isize, opts: &FilterOptions) -> FilterResult<NdArray> {
    smoothed_derivative(input, axis, &SOBEL_SMOOTH, opts)
}

/// Options handed to a derivative callback for one axis.
fn axis_options(opts: &FilterOptions, mode: ndimage_core::BoundaryMode) -> FilterOptions {
    FilterOptions {
        mode: PerAxis::All(mode),
        cval: opts.cval,
        origin: PerAxis::All(0),
        output: Output::Infer,
    }
}

/// Sum over the axes of a second-derivative callback.
///
/// `derivative2(input, axis, options, context)` must return an array of
/// the input shape. The result dtype is the dtype the callback produces,
/// unless the output options say otherwise. A zero-rank input is copied.
pub fn generic_laplace<C, F>(
    input: &NdArray,
    derivative2: F,
    context: &C,
    opts: &FilterOptions,
) -> FilterResult<NdArray>
where
    C: ?Sized,
    F: Fn(&NdArray, usize, &FilterOptions, &C) -> FilterResult<NdArray>,
{
    let ndim = input.ndim();
    let modes = opts.mode.expand(ndim)?;
    let copy_target = opts.output.target(input.shape(), input.dtype())?;
    if ndim == 0 {
        return Ok(opts.output.clone().deliver(input.astype(copy_target)));
    }

    let mut sum: Option<ArrayD<f64>> = None;
    let mut inferred = input.dtype();
    for (axis, &mode) in modes.iter().enumerate() {
        let d = derivative2(input, axis, &axis_options(opts, mode), context)?;
        inferred = d.dtype();
        let d = d.to_f64();
        sum = Some(match sum {
            Some(acc) => acc + d,
            None => d,
        });
    }

    let target = opts.output.target(input.shape(), inferred)?;
    let sum = sum.unwrap_or_else(|| input.to_f64());
    Ok(opts.output.clone().deliver(NdArray::from_f64(sum, target)))
}

/// Square root of the summed squares of a first-derivative callback over
/// the axes.
///
/// `derivative(input, axis, options, context)` must return an array of the
/// input shape. Dtype handling follows [`generic_laplace`].
pub fn generic_gradient_magnitude<C, F>(
    input: &NdArray,
    derivative: F,
    context: &C,
    opts: &FilterOptions,
) -> FilterResult<NdArray>
where
    C: ?Sized,
    F: Fn(&NdArray, usize, &FilterOptions, &C) -> FilterResult<NdArray>,
{
    let ndim = input.ndim();
    let modes = opts.mode.expand(ndim)?;
    let copy_target = opts.output.target(input.shape(), input.dtype())?;
    if ndim == 0 {
        return Ok(opts.output.clone().deliver(input.astype(copy_target)));
    }

    let mut sum: Option<ArrayD<f64>> = None;
    let mut inferred = input.dtype();
    for (axis, &mode) in modes.iter().enumerate() {
        let d = derivative(input, axis, &axis_options(opts, mode), context)?;
        inferred = d.dtype();
        let sq = d.to_f64().mapv(|v| v * v);
        sum = Some(match sum {
            Some(acc) => acc + sq,
            None => sq,
        });
    }

    let target = opts.output.target(input.shape(), inferred)?;
    let magnitude = sum.unwrap_or_else(|| input.to_f64()).mapv(f64::sqrt);
    Ok(opts.output.clone().deliver(NdArray::from_f64(magnitude, target)))
}

/// Discrete Laplace operator: the sum of `[1, -2, 1]` passes along every
/// axis.
pub fn laplace(input: &NdArray, opts: &FilterOptions) -> FilterResult<NdArray> {
    generic_laplace(
        input,
        |a, axis, o, _: &()| correlate1d(a, &SECOND_DERIVATIVE, axis as isize, o),
        &(),
        opts,
    )
}

fn gaussian_derivative(
    input: &NdArray,
    axis: usize,
    order: usize,
    sigma: &PerAxis<f64>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let mut orders = vec![0; input.ndim()];
    orders[axis] = order;
    gaussian_filter(input, sigma.clone(), orders, DEFAULT_TRUNCATE, opts)
}

/// Laplace operator using second derivatives of a Gaussian.
pub fn gaussian_laplace(
    input: &NdArray,
    sigma: impl Into<PerAxis<f64>>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let sigma = sigma.into();
    generic_laplace(
        input,
        |a, axis, o, sigma| gaussian_derivative(a, axis, 2, sigma, o),
        &sigma,
        opts,
    )
}

/// Gradient magnitude using first derivatives of a Gaussian.
pub fn gaussian_gradient_magnitude(
    input: &NdArray,
    sigma: impl Into<PerAxis<f64>>,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let sigma = sigma.into();
    generic_gradient_magnitude(
        input,
        |a, axis, o, sigma| gaussian_derivative(a, axis, 1, sigma, o),
        &sigma,
        opts,
    )
}
