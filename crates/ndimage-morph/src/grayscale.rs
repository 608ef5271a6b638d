//! Grey-scale morphology
//!
//! Erosion is the minimum filter and dilation the maximum filter over the
//! reflected window, so both accept a size, a footprint and an additive
//! structure in any combination the filters accept. With a structure `s`,
//! erosion is the minimum of `in - s` and dilation the maximum of `in + s`.
//!
//! Results keep the input dtype unless the output options say otherwise.

use crate::MorphResult;
use ndimage_core::{FilterOptions, NdArray, PerAxis, Window, WindowSpec, validate_origin};
use ndimage_filter::{Extremum, extremum_filter};

/// Origin of the reflected window: negated, and one further back on axes
/// of even extent so the reflection is about the same reference point.
fn reflected_origin(window: &Window, origin: &PerAxis<isize>) -> MorphResult<Vec<isize>> {
    let shape = window.shape();
    let origin = origin.expand(shape.len())?;
    validate_origin(shape, &origin)?;
    Ok(shape
        .iter()
        .zip(&origin)
        .map(|(&size, &o)| if size % 2 == 0 { -o - 1 } else { -o })
        .collect())
}

/// Multidimensional grey-scale erosion.
///
/// # Errors
///
/// Propagates the window and origin validation of the minimum filter.
pub fn grey_erosion(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    let window = spec.resolve(input.ndim())?;
    Ok(extremum_filter(input, &window, opts, Extremum::Minimum)?)
}

/// Multidimensional grey-scale dilation.
pub fn grey_dilation(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    let window = spec.resolve(input.ndim())?;
    let origin = reflected_origin(&window, &opts.origin)?;
    let opts = FilterOptions {
        mode: opts.mode.clone(),
        cval: opts.cval,
        origin: PerAxis::Each(origin),
        output: opts.output.clone(),
    };
    Ok(extremum_filter(input, &window.reversed(), &opts, Extremum::Maximum)?)
}

/// Grey-scale opening: erosion followed by dilation.
pub fn grey_opening(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    let eroded = grey_erosion(input, spec, &opts.intermediate())?;
    grey_dilation(&eroded, spec, opts)
}

/// Grey-scale closing: dilation followed by erosion.
pub fn grey_closing(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    let dilated = grey_dilation(input, spec, &opts.intermediate())?;
    grey_erosion(&dilated, spec, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndimage_core::{BoundaryMode, DType};

    #[test]
    fn test_dilation_reflects_even_footprint() {
        let x = NdArray::from(array![[3i32, 2, 5, 1, 4], [7, 6, 9, 3, 5], [5, 8, 3, 7, 1]]);
        let spec = WindowSpec::footprint(array![[false, true, true], [true, false, true]]);
        let d = grey_dilation(&x, &spec, &FilterOptions::default()).unwrap();
        assert_eq!(
            d,
            NdArray::from(array![[7i32, 7, 9, 9, 5], [7, 9, 8, 9, 7], [8, 8, 8, 7, 7]])
        );
    }

    #[test]
    fn test_structure_offsets_values() {
        let x = NdArray::from(array![[3u8, 2, 5, 1, 4], [7, 6, 9, 3, 5], [5, 8, 3, 7, 1]]);
        let spec = WindowSpec::footprint(array![[true, false, true], [true, true, false]])
            .with_structure(array![[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]);
        let e = grey_erosion(&x, &spec, &FilterOptions::default()).unwrap();
        assert_eq!(e.dtype(), DType::U8);
        assert_eq!(
            e.to_vec_f64(),
            vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 2.0, 0.0, 4.0, 4.0, 2.0, 2.0, 0.0]
        );
    }

    #[test]
    fn test_origin_validated_before_reflection() {
        let x = NdArray::zeros(&[5], DType::F64);
        let opts = FilterOptions::with_mode(BoundaryMode::Nearest).origin(1isize);
        assert!(grey_dilation(&x, &WindowSpec::size(2usize), &opts).is_err());
        assert!(grey_dilation(&x, &WindowSpec::size(3usize), &opts).is_ok());
    }
}
