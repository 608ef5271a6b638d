//! ndimage-morph - Morphology for N-dimensional arrays
//!
//! This crate provides morphological operations including:
//!
//! - Structuring elements of any rank and connectivity, and their iteration
//! - Binary morphology: erosion, dilation, opening, closing, with masks,
//!   border values and repetition until stable
//! - Hit-or-miss transform for pattern detection
//! - Binary propagation and hole filling
//! - Grey-scale morphology: erosion, dilation, opening, closing with flat
//!   footprints or additive structures
//! - Morphological gradient and Laplacian, white and black top-hat

pub mod binary;
mod error;
pub mod grayscale;
pub mod morphapp;
pub mod structure;

pub use error::{MorphError, MorphResult};

pub use binary::{
    BinaryOptions, Iterations, binary_closing, binary_dilation, binary_erosion,
    binary_hit_or_miss, binary_opening,
};
pub use grayscale::{grey_closing, grey_dilation, grey_erosion, grey_opening};
pub use morphapp::{
    binary_fill_holes, binary_propagation, black_tophat, morphological_gradient,
    morphological_laplace, white_tophat,
};
pub use structure::{generate_binary_structure, iterate_structure, iterate_structure_with_origin};
