//! Error types for ndimage-morph

use ndimage_filter::FilterError;
use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ndimage_core::Error),

    /// Error from the underlying filter engines
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidStructure(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
