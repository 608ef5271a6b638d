//! Structuring elements
//!
//! Boolean structuring elements for binary morphology, and their growth by
//! repeated dilation with themselves.

use crate::binary::{BinaryOptions, Iterations, Pass, run_binary};
use crate::{MorphError, MorphResult};
use ndarray::{ArrayD, Dimension, IxDyn, Slice};
use ndimage_core::PerAxis;

/// Structuring element of the given rank and connectivity.
///
/// The element is a `3 x 3 x ...` box in which a position is set when its
/// city-block distance from the centre is at most `connectivity`. A
/// connectivity of 1 gives the cross of direct neighbours, `rank` or more
/// gives the full box. Connectivity below 1 is treated as 1; rank 0 gives a
/// zero-dimensional `true`.
pub fn generate_binary_structure(rank: usize, connectivity: usize) -> ArrayD<bool> {
    let connectivity = connectivity.max(1);
    ArrayD::from_shape_fn(IxDyn(&vec![3; rank]), |index| {
        index.slice().iter().map(|&i| i.abs_diff(1)).sum::<usize>() <= connectivity
    })
}

/// Dilate `structure` with itself `iterations - 1` times.
///
/// The result has extent `n * (s - 1) + 1` on an axis where the element
/// has extent `s`. Fewer than two iterations return a copy.
///
/// # Errors
///
/// Returns [`MorphError::InvalidStructure`] if `structure` has a
/// zero-length axis.
pub fn iterate_structure(structure: &ArrayD<bool>, iterations: usize) -> MorphResult<ArrayD<bool>> {
    if structure.is_empty() {
        return Err(MorphError::InvalidStructure(format!(
            "structure of shape {:?} has no elements",
            structure.shape()
        )));
    }
    if iterations < 2 {
        return Ok(structure.clone());
    }

    let grow = iterations - 1;
    let shape: Vec<usize> = structure.shape().iter().map(|&s| s + grow * (s - 1)).collect();
    let mut seed = ArrayD::from_elem(IxDyn(&shape), false);
    seed.slice_each_axis_mut(|ax| {
        let len = structure.len_of(ax.axis);
        let start = grow * (len / 2);
        Slice::from(start..start + len)
    })
    .assign(structure);

    let opts = BinaryOptions {
        structure: Some(structure.clone()),
        iterations: Iterations::Times(grow),
        ..BinaryOptions::default()
    };
    run_binary(seed, &opts, Pass::Dilate)
}

/// [`iterate_structure`], also scaling an origin by the iteration count.
pub fn iterate_structure_with_origin(
    structure: &ArrayD<bool>,
    iterations: usize,
    origin: &PerAxis<isize>,
) -> MorphResult<(ArrayD<bool>, Vec<isize>)> {
    let origin = origin.expand(structure.ndim())?;
    let iterated = iterate_structure(structure, iterations)?;
    let scale = iterations.max(1) as isize;
    Ok((iterated, origin.iter().map(|o| o * scale).collect()))
}
