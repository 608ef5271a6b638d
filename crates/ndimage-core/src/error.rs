//! Error types for ndimage-core
//!
//! Provides a unified error type for argument validation shared by every
//! filter and morphology operation. All of these conditions are detected
//! before any output element is computed, so a failed call never leaves a
//! partially written result behind.

use crate::dtype::DType;
use thiserror::Error;

/// ndimage error type
#[derive(Error, Debug)]
pub enum Error {
    /// Kernel/footprint rank differs from the input rank, or an explicit
    /// output array does not have the computed output shape
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Unrecognized boundary mode name
    #[error("invalid boundary mode: {0:?}")]
    InvalidMode(String),

    /// Origin outside the half-extent of the kernel along an axis
    #[error("origin {origin} out of bounds for axis {axis} of filter length {size}")]
    OriginOutOfBounds {
        axis: usize,
        origin: isize,
        size: usize,
    },

    /// Neither a footprint nor a size was supplied
    #[error("no footprint or filter size provided")]
    MissingNeighbourhoodSpec,

    /// Resolved rank index outside `[0, size - 1]`
    #[error("rank {rank} out of range for neighbourhood of {size} elements")]
    RankOutOfRange { rank: isize, size: usize },

    /// Output dtype cannot hold the result of the requested operation
    #[error("cannot write {from} results into a {to} output")]
    DtypeMismatch { from: DType, to: DType },

    /// Axis index outside `[-ndim, ndim)`
    #[error("axis {axis} out of range for array of rank {ndim}")]
    AxisOutOfRange { axis: isize, ndim: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Array construction failed
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type alias for ndimage operations
pub type Result<T> = std::result::Result<T, Error>;
