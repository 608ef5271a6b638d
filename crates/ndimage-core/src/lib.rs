//! ndimage-core - Basic data structures for N-dimensional filtering
//!
//! This crate provides the types shared by the filter and morphology
//! crates:
//!
//! - [`NdArray`] - Dense N-d array with a run-time element kind
//! - [`DType`] / [`Element`] - Element kinds and scalar conversions
//! - [`BoundaryMode`] - Out-of-bounds extension rules
//! - [`Neighbourhood`] / [`WindowSpec`] - Precomputed window offsets
//! - [`FilterOptions`] / [`Output`] - Per-call options and result placement
//! - [`PerAxis`] - Scalar-or-per-axis arguments

pub mod array;
pub mod axes;
pub mod boundary;
pub mod dtype;
pub mod element;
pub mod error;
pub mod neighbourhood;
pub mod options;

pub use array::{NdArray, cast_array};
pub use axes::{PerAxis, normalize_axis};
pub use boundary::BoundaryMode;
pub use dtype::DType;
pub use element::Element;
pub use error::{Error, Result};
pub use neighbourhood::{Neighbourhood, Window, WindowSpec, validate_origin};
pub use options::{FilterOptions, Output};
