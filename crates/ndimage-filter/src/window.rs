//! General window engine
//!
//! Evaluates an arbitrary N-d [`Neighbourhood`] at every element of the
//! input. For each output coordinate the samples at the neighbourhood's
//! offsets are gathered, in offset order, into a per-worker scratch buffer
//! and handed to a reduction. Coordinates that fall outside the input are
//! resolved per axis by an [`EdgeRule`]; when any axis has no in-range
//! mapping the sample is the rule's fill value instead.
//!
//! The output is partitioned by flat coordinate across the rayon pool.

use crate::{FilterError, FilterResult};
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use ndimage_core::{BoundaryMode, Element, Neighbourhood};
use rayon::prelude::*;
use std::borrow::Cow;

/// How a window sample outside the input is obtained.
pub trait EdgeRule<T>: Sync {
    /// Map an out-of-range coordinate on an axis of length `len` to an
    /// in-range one, or `None` to use [`fill`](Self::fill).
    fn resolve(&self, index: isize, len: usize) -> Option<usize>;

    /// Value of samples with no in-range mapping.
    fn fill(&self) -> T;
}

/// Extend the input by a [`BoundaryMode`], with `cval` for
/// [`BoundaryMode::Constant`].
#[derive(Debug, Clone, Copy)]
pub struct Extend<T> {
    pub mode: BoundaryMode,
    pub cval: T,
}

impl<T: Element> EdgeRule<T> for Extend<T> {
    #[inline]
    fn resolve(&self, index: isize, len: usize) -> Option<usize> {
        self.mode.resolve(index, len)
    }

    #[inline]
    fn fill(&self) -> T {
        self.cval
    }
}

/// Treat everything outside the input as one fixed value.
#[derive(Debug, Clone, Copy)]
pub struct Border<T>(pub T);

impl<T: Element> EdgeRule<T> for Border<T> {
    #[inline]
    fn resolve(&self, _index: isize, _len: usize) -> Option<usize> {
        None
    }

    #[inline]
    fn fill(&self) -> T {
        self.0
    }
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }
    strides
}

/// Apply `reduce` to the window samples at every element of `input`.
///
/// `reduce` receives the samples in the order of `hood`'s offsets and may
/// reorder them in place.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if the window rank differs
/// from the input rank.
pub fn apply_window<T, R, E, F>(
    input: ArrayViewD<'_, T>,
    hood: &Neighbourhood,
    edge: &E,
    reduce: F,
) -> FilterResult<ArrayD<R>>
where
    T: Element,
    R: Send,
    E: EdgeRule<T>,
    F: Fn(&mut [T]) -> R + Sync,
{
    let shape = input.shape().to_vec();
    let ndim = shape.len();
    if hood.ndim() != ndim {
        return Err(FilterError::InvalidParameters(format!(
            "window rank {} does not match input rank {ndim}",
            hood.ndim()
        )));
    }

    let data: Cow<'_, [T]> = match input.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(input.iter().copied().collect()),
    };
    let data = &*data;
    let strides = row_major_strides(&shape);

    let values: Vec<R> = (0..data.len())
        .into_par_iter()
        .map_init(
            || (Vec::with_capacity(hood.len()), vec![0usize; ndim]),
            |(samples, coord), flat| {
                let mut rest = flat;
                for d in 0..ndim {
                    coord[d] = rest / strides[d];
                    rest %= strides[d];
                }

                samples.clear();
                for offset in hood.offsets() {
                    let mut pos = Some(0usize);
                    for d in 0..ndim {
                        let i = coord[d] as isize + offset[d];
                        let j = if i >= 0 && (i as usize) < shape[d] {
                            Some(i as usize)
                        } else {
                            edge.resolve(i, shape[d])
                        };
                        pos = match (pos, j) {
                            (Some(p), Some(j)) => Some(p + j * strides[d]),
                            _ => None,
                        };
                        if pos.is_none() {
                            break;
                        }
                    }
                    samples.push(match pos {
                        Some(p) => data[p],
                        None => edge.fill(),
                    });
                }
                reduce(samples.as_mut_slice())
            },
        )
        .collect();

    Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
}
