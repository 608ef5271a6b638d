//! Error types for ndimage-filter
//!
//! Argument validation shared with the morphology crate lives in
//! [`ndimage_core::Error`]; this enum wraps it and adds kernel problems.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core validation error
    #[error("core error: {0}")]
    Core(#[from] ndimage_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl From<ndarray::ShapeError> for FilterError {
    fn from(err: ndarray::ShapeError) -> Self {
        FilterError::Core(err.into())
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
