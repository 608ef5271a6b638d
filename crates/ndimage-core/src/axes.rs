//! Per-axis arguments
//!
//! Sizes, origins, sigmas, derivative orders and boundary modes may be given
//! either once for every axis or as one value per axis.

use crate::error::{Error, Result};

/// A scalar broadcast to every axis, or one value per axis.
#[derive(Debug, Clone, PartialEq)]
pub enum PerAxis<T> {
    /// Same value on every axis
    All(T),
    /// Explicit value for each axis, in axis order
    Each(Vec<T>),
}

impl<T: Clone> PerAxis<T> {
    /// Expand to exactly `ndim` values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if a per-axis list does not have
    /// `ndim` entries.
    pub fn expand(&self, ndim: usize) -> Result<Vec<T>> {
        match self {
            PerAxis::All(v) => Ok(vec![v.clone(); ndim]),
            PerAxis::Each(vs) if vs.len() == ndim => Ok(vs.clone()),
            PerAxis::Each(vs) => Err(Error::ShapeMismatch(format!(
                "per-axis argument has {} entries but input has rank {}",
                vs.len(),
                ndim
            ))),
        }
    }

    /// The single value, if one value applies to every axis.
    pub fn uniform(&self) -> Option<&T> {
        match self {
            PerAxis::All(v) => Some(v),
            PerAxis::Each(_) => None,
        }
    }
}

impl<T: Default> Default for PerAxis<T> {
    fn default() -> Self {
        PerAxis::All(T::default())
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {$(
        impl From<$t> for PerAxis<$t> {
            fn from(value: $t) -> Self {
                PerAxis::All(value)
            }
        }
    )*};
}

impl_from_scalar!(usize, isize, f64);

impl<T> From<Vec<T>> for PerAxis<T> {
    fn from(values: Vec<T>) -> Self {
        PerAxis::Each(values)
    }
}

impl<T: Clone> From<&[T]> for PerAxis<T> {
    fn from(values: &[T]) -> Self {
        PerAxis::Each(values.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for PerAxis<T> {
    fn from(values: [T; N]) -> Self {
        PerAxis::Each(values.into())
    }
}

/// Resolve a possibly negative axis index against `ndim`.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved >= ndim as isize {
        return Err(Error::AxisOutOfRange { axis, ndim });
    }
    Ok(resolved as usize)
}
