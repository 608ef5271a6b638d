//! Morphological applications
//!
//! Operations composed from erosion and dilation:
//!
//! - Binary propagation and hole filling (dilation iterated to a fixed
//!   point under a mask)
//! - Morphological gradient and Laplacian
//! - White and black top-hat transforms
//!
//! The grey-scale compositions combine their parts element-wise in the
//! input dtype, with wrapping integer arithmetic.

use crate::MorphResult;
use crate::binary::{BinaryOptions, Iterations, Pass, deliver_bool, run_binary};
use crate::grayscale::{grey_closing, grey_dilation, grey_erosion, grey_opening};
use ndarray::{ArrayD, Zip};
use ndimage_core::{
    DType, Element, FilterOptions, NdArray, Output, PerAxis, WindowSpec, dispatch,
};

/// Binary dilation repeated until stable.
///
/// The `iterations` field of `opts` is ignored. With a mask this grows the
/// seed in `input` through the connected true region of the mask.
pub fn binary_propagation(input: &NdArray, opts: &BinaryOptions) -> MorphResult<NdArray> {
    opts.output.target(input.shape(), DType::Bool)?;
    let opts = BinaryOptions {
        iterations: Iterations::UntilStable,
        ..opts.clone()
    };
    let result = run_binary(input.to_bool(), &opts, Pass::Dilate)?;
    deliver_bool(result, &opts.output)
}

/// Fill the holes in binary objects.
///
/// A hole is a false region that cannot be reached from outside the array
/// through false elements, where reachability follows `structure`.
pub fn binary_fill_holes(
    input: &NdArray,
    structure: Option<&ArrayD<bool>>,
    origin: &PerAxis<isize>,
    output: &Output,
) -> MorphResult<NdArray> {
    output.target(input.shape(), DType::Bool)?;
    let background = input.to_bool().mapv(|b| !b);
    let opts = BinaryOptions {
        structure: structure.cloned(),
        iterations: Iterations::UntilStable,
        mask: Some(background),
        border_value: true,
        origin: origin.clone(),
        output: Output::Infer,
    };
    let seed = ArrayD::from_elem(input.shape(), false);
    let outside = run_binary(seed, &opts, Pass::Dilate)?;
    deliver_bool(outside.mapv(|b| !b), output)
}

/// Element-wise `op(a, b)` in the element type of `a`.
fn elementwise<T: Element>(a: &ArrayD<T>, b: &NdArray, op: impl Fn(T, T) -> T) -> NdArray {
    let converted;
    let b = match b.as_array::<T>() {
        Some(b) => b,
        None => {
            converted = b.to_f64().mapv(T::from_f64);
            &converted
        }
    };
    NdArray::from(Zip::from(a).and(b).map_collect(|&x, &y| op(x, y)))
}

fn deliver(result: NdArray, input: &NdArray, opts: &FilterOptions) -> MorphResult<NdArray> {
    let target = opts.output.target(input.shape(), input.dtype())?;
    Ok(opts.output.clone().deliver(result.into_dtype(target)))
}

/// Morphological gradient: dilation minus erosion.
pub fn morphological_gradient(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    opts.output.target(input.shape(), input.dtype())?;
    let inner = opts.intermediate();
    let dilated = grey_dilation(input, spec, &inner)?;
    let eroded = grey_erosion(input, spec, &inner)?;
    let result = dispatch!(&dilated, d => elementwise(d, &eroded, Element::wrapping_sub));
    deliver(result, input, opts)
}

/// Morphological Laplacian: dilation plus erosion minus twice the input.
pub fn morphological_laplace(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    opts.output.target(input.shape(), input.dtype())?;
    let inner = opts.intermediate();
    let dilated = grey_dilation(input, spec, &inner)?;
    let eroded = grey_erosion(input, spec, &inner)?;
    let sum = dispatch!(&dilated, d => elementwise(d, &eroded, Element::wrapping_add));
    let result = dispatch!(&sum, s => elementwise(s, input, |v, x| v.wrapping_sub(x).wrapping_sub(x)));
    deliver(result, input, opts)
}

/// White top-hat: the input minus its opening.
pub fn white_tophat(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    opts.output.target(input.shape(), input.dtype())?;
    let opened = grey_opening(input, spec, &opts.intermediate())?;
    let result = dispatch!(input, x => elementwise(x, &opened, Element::wrapping_sub));
    deliver(result, input, opts)
}

/// Black top-hat: the closing minus the input.
pub fn black_tophat(
    input: &NdArray,
    spec: &WindowSpec,
    opts: &FilterOptions,
) -> MorphResult<NdArray> {
    opts.output.target(input.shape(), input.dtype())?;
    let closed = grey_closing(input, spec, &opts.intermediate())?;
    let result = dispatch!(&closed, c => elementwise(c, input, Element::wrapping_sub));
    deliver(result, input, opts)
}
