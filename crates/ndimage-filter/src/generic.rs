//! Caller-supplied filter functions
//!
//! The window or line values are handed to the callback as `f64`, together
//! with a caller context. The result keeps the input dtype unless the output
//! options say otherwise.

use crate::convolve::{axis_settings, check_origin};
use crate::line::{LinePass, apply_lines};
use crate::window::{Extend, apply_window};
use crate::{FilterError, FilterResult};
use ndimage_core::{FilterOptions, NdArray, WindowSpec, normalize_axis};

/// Evaluate `function(window_values, context)` at every element.
///
/// Window values are listed in row-major footprint order.
///
/// # Errors
///
/// - [`FilterError::InvalidParameters`] for a structure or an empty footprint
/// - the window resolution errors of [`WindowSpec::resolve`]
pub fn generic_filter<C, F>(
    input: &NdArray,
    function: F,
    context: &C,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> FilterResult<NdArray>
where
    C: Sync + ?Sized,
    F: Fn(&[f64], &C) -> f64 + Sync,
{
    let window = spec.resolve(input.ndim())?;
    if window.structure().is_some() {
        return Err(FilterError::InvalidParameters(
            "generic filters do not take a structure".to_string(),
        ));
    }
    if window.count() == 0 {
        return Err(FilterError::InvalidParameters(
            "footprint has no true element".to_string(),
        ));
    }
    let mode = opts.single_mode()?;
    let hood = window.neighbourhood(&opts.origin)?;
    let target = opts.output.target(input.shape(), input.dtype())?;

    let data = input.to_f64();
    let edge = Extend {
        mode,
        cval: opts.cval,
    };
    let out = apply_window(data.view(), &hood, &edge, |samples| function(samples, context))?;
    Ok(opts.output.clone().deliver(NdArray::from_f64(out, target)))
}

/// Run `function(extended_line, output_line, context)` over every line
/// along `axis`.
///
/// The extended line holds `len + filter_size - 1` values, extended by the
/// boundary mode of that axis; the output line holds `len` values.
pub fn generic_filter1d<C, F>(
    input: &NdArray,
    function: F,
    context: &C,
    filter_size: usize,
    axis: isize,
    opts: &FilterOptions,
) -> FilterResult<NdArray>
where
    C: Sync + ?Sized,
    F: Fn(&[f64], &mut [f64], &C) + Sync,
{
    if filter_size == 0 {
        return Err(FilterError::InvalidParameters(
            "filter size must be at least 1".to_string(),
        ));
    }
    let ndim = input.ndim();
    let axis = normalize_axis(axis, ndim)?;
    let (modes, origins) = axis_settings(opts, ndim)?;
    check_origin(axis, filter_size, origins[axis])?;
    let target = opts.output.target(input.shape(), input.dtype())?;

    let data = input.to_f64();
    let pass = LinePass {
        axis,
        size: filter_size,
        origin: origins[axis],
        mode: modes[axis],
        cval: opts.cval,
    };
    let out = apply_lines(data.view(), &pass, |ext, line| function(ext, line, context));
    Ok(opts.output.clone().deliver(NdArray::from_f64(out, target)))
}
