//! Order-statistic filters
//!
//! Minimum, maximum, rank, percentile and median filters over a size,
//! footprint or (for minimum/maximum) additive structure.
//!
//! Routing:
//! - a box window without structure is applied as one sliding-extremum
//!   pass per axis
//! - any other flat footprint goes through the general window engine in
//!   the input's own element type
//! - an additive structure is evaluated in `f64`
//!
//! Rank selection uses an in-place partial sort of the window samples.
//! Ranks 0 and `N - 1` are the minimum and maximum filters.

use crate::convolve::{axis_settings, check_origin};
use crate::line::{Extremum, LinePass, apply_lines, extremum_line};
use crate::window::{Extend, apply_window};
use crate::{FilterError, FilterResult};
use ndarray::{ArrayD, ArrayViewD};
use ndimage_core::{
    BoundaryMode, Element, Error, FilterOptions, NdArray, Neighbourhood, Window, WindowSpec,
    dispatch, normalize_axis,
};

fn separable_extremum<T: Element>(
    input: ArrayViewD<'_, T>,
    sizes: &[usize],
    modes: &[BoundaryMode],
    origins: &[isize],
    cval: f64,
    kind: Extremum,
) -> NdArray {
    let cval = T::from_f64(cval);
    let mut data = input.to_owned();
    for (axis, &size) in sizes.iter().enumerate() {
        if size <= 1 {
            continue;
        }
        let pass = LinePass {
            axis,
            size,
            origin: origins[axis],
            mode: modes[axis],
            cval,
        };
        data = apply_lines(data.view(), &pass, |ext, out| {
            extremum_line(ext, size, kind, out)
        });
    }
    NdArray::from(data)
}

fn flat_extremum<T: Element>(
    input: &ArrayD<T>,
    hood: &Neighbourhood,
    mode: BoundaryMode,
    cval: f64,
    kind: Extremum,
) -> FilterResult<NdArray> {
    let edge = Extend {
        mode,
        cval: T::from_f64(cval),
    };
    let out = apply_window(input.view(), hood, &edge, |samples| kind.reduce(samples))?;
    Ok(NdArray::from(out))
}

fn structured_extremum(
    input: &NdArray,
    hood: &Neighbourhood,
    mode: BoundaryMode,
    cval: f64,
    kind: Extremum,
) -> FilterResult<ArrayD<f64>> {
    let data = input.to_f64();
    let edge = Extend { mode, cval };
    let structure = hood.values();
    apply_window(data.view(), hood, &edge, |samples| {
        for (s, v) in samples.iter_mut().zip(structure) {
            match kind {
                Extremum::Minimum => *s -= v,
                Extremum::Maximum => *s += v,
            }
        }
        kind.reduce(samples)
    })
}

/// Minimum or maximum over a resolved window.
///
/// With an additive structure `s`, the minimum is taken over `in - s` and
/// the maximum over `in + s`. The result keeps the input dtype unless the
/// output options say otherwise.
///
/// # Errors
///
/// - [`FilterError::InvalidParameters`] if the footprint has no true element
/// - [`Error::InvalidParameter`] for per-axis modes on a non-box window
pub fn extremum_filter(
    input: &NdArray,
    window: &Window,
    opts: &FilterOptions,
    kind: Extremum,
) -> FilterResult<NdArray> {
    if window.count() == 0 {
        return Err(FilterError::InvalidParameters(
            "footprint has no true element".to_string(),
        ));
    }
    let ndim = input.ndim();
    let target = opts.output.target(input.shape(), input.dtype())?;

    let result = if let Some(sizes) = window.separable_sizes() {
        log::debug!("{kind:?} filter: separable passes over sizes {sizes:?}");
        let (modes, origins) = axis_settings(opts, ndim)?;
        for (axis, &size) in sizes.iter().enumerate() {
            if size > 1 {
                check_origin(axis, size, origins[axis])?;
            }
        }
        dispatch!(input, a => separable_extremum(a.view(), &sizes, &modes, &origins, opts.cval, kind))
    } else {
        let mode = opts.single_mode()?;
        let hood = window.neighbourhood(&opts.origin)?;
        if window.structure().is_some() {
            log::debug!("{kind:?} filter: additive structure over {} positions", hood.len());
            let out = structured_extremum(input, &hood, mode, opts.cval, kind)?;
            NdArray::from_f64(out, input.dtype())
        } else {
            log::debug!("{kind:?} filter: footprint of {} positions", hood.len());
            dispatch!(input, a => flat_extremum(a, &hood, mode, opts.cval, kind))?
        }
    };
    Ok(opts.output.clone().deliver(result.into_dtype(target)))
}

/// Multidimensional minimum filter.
pub fn minimum_filter(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let window = spec.resolve(input.ndim())?;
    extremum_filter(input, &window, opts, Extremum::Minimum)
}

/// Multidimensional maximum filter.
pub fn maximum_filter(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let window = spec.resolve(input.ndim())?;
    extremum_filter(input, &window, opts, Extremum::Maximum)
}

fn extremum_filter1d(
    input: &NdArray,
    size: usize,
    axis: isize,
    opts: &FilterOptions,
    kind: Extremum,
) -> FilterResult<NdArray> {
    if size == 0 {
        return Err(FilterError::InvalidParameters(
            "filter size must be at least 1".to_string(),
        ));
    }
    let ndim = input.ndim();
    let axis = normalize_axis(axis, ndim)?;
    let (modes, origins) = axis_settings(opts, ndim)?;
    check_origin(axis, size, origins[axis])?;
    let target = opts.output.target(input.shape(), input.dtype())?;

    let mut sizes = vec![1; ndim];
    sizes[axis] = size;
    let result =
        dispatch!(input, a => separable_extremum(a.view(), &sizes, &modes, &origins, opts.cval, kind));
    Ok(opts.output.clone().deliver(result.into_dtype(target)))
}

/// Minimum over `size` consecutive elements along `axis`.
pub fn minimum_filter1d(
    input: &NdArray,
    size: usize,
    axis: isize,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    extremum_filter1d(input, size, axis, opts, Extremum::Minimum)
}

/// Maximum over `size` consecutive elements along `axis`.
pub fn maximum_filter1d(
    input: &NdArray,
    size: usize,
    axis: isize,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    extremum_filter1d(input, size, axis, opts, Extremum::Maximum)
}

/// Resolve a possibly negative rank against a window of `size` elements.
///
/// # Errors
///
/// Returns [`Error::RankOutOfRange`] unless the resolved rank lies in
/// `0..size`.
pub fn resolve_rank(rank: isize, size: usize) -> FilterResult<usize> {
    let resolved = if rank < 0 { rank + size as isize } else { rank };
    if resolved < 0 || resolved as usize >= size {
        return Err(Error::RankOutOfRange { rank, size }.into());
    }
    Ok(resolved as usize)
}

fn select_rank<T: Element>(
    input: &ArrayD<T>,
    hood: &Neighbourhood,
    mode: BoundaryMode,
    cval: f64,
    rank: usize,
) -> FilterResult<NdArray> {
    let edge = Extend {
        mode,
        cval: T::from_f64(cval),
    };
    let out = apply_window(input.view(), hood, &edge, |samples| {
        let (_, value, _) = samples.select_nth_unstable_by(rank, |a, b| a.order(b));
        *value
    })?;
    Ok(NdArray::from(out))
}

fn rank_window(input: &NdArray, spec: &WindowSpec) -> FilterResult<Window> {
    let window = spec.resolve(input.ndim())?;
    if window.structure().is_some() {
        return Err(FilterError::InvalidParameters(
            "rank filters do not take a structure".to_string(),
        ));
    }
    if window.count() == 0 {
        return Err(FilterError::InvalidParameters(
            "footprint has no true element".to_string(),
        ));
    }
    Ok(window)
}

fn rank_filter_at(
    input: &NdArray,
    window: &Window,
    rank: usize,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let count = window.count();
    if rank == 0 {
        return extremum_filter(input, window, opts, Extremum::Minimum);
    }
    if rank == count - 1 {
        return extremum_filter(input, window, opts, Extremum::Maximum);
    }

    let mode = opts.single_mode()?;
    let hood = window.neighbourhood(&opts.origin)?;
    let target = opts.output.target(input.shape(), input.dtype())?;
    log::debug!("rank {rank} of {count} window positions");
    let result = dispatch!(input, a => select_rank(a, &hood, mode, opts.cval, rank))?;
    Ok(opts.output.clone().deliver(result.into_dtype(target)))
}

/// Element of the given rank within the window, counting from the
/// smallest. Negative ranks count from the largest (`-1` is the maximum).
pub fn rank_filter(
    input: &NdArray,
    rank: isize,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let window = rank_window(input, spec)?;
    let rank = resolve_rank(rank, window.count())?;
    rank_filter_at(input, &window, rank, opts)
}

/// Element at `percentile` (0..=100) of the window, selected as rank
/// `floor(percentile / 100 * (N - 1))`. Percentiles in `[-100, 0)` count
/// from the top.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for percentiles outside
/// `[-100, 100]`.
pub fn percentile_filter(
    input: &NdArray,
    percentile: f64,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let p = if (-100.0..0.0).contains(&percentile) {
        percentile + 100.0
    } else {
        percentile
    };
    if !(0.0..=100.0).contains(&p) {
        return Err(FilterError::InvalidParameters(format!(
            "percentile must lie in [-100, 100], got {percentile}"
        )));
    }
    let window = rank_window(input, spec)?;
    let count = window.count();
    let rank = (p / 100.0 * (count - 1) as f64).floor() as usize;
    rank_filter_at(input, &window, rank.min(count - 1), opts)
}

/// Median of the window: rank `N / 2`.
pub fn median_filter(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> FilterResult<NdArray> {
    let window = rank_window(input, spec)?;
    let count = window.count();
    rank_filter_at(input, &window, count / 2, opts)
}
