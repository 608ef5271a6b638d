//! ndimage - N-dimensional image processing for Rust
//!
//! Filters and morphology over arrays of any rank and element kind.
//!
//! # Overview
//!
//! - Correlation, convolution, uniform and Gaussian smoothing
//! - Minimum, maximum, rank, percentile and median filters
//! - Generic filters driven by a caller-supplied function
//! - Derivative filters: Prewitt, Sobel, Laplace, Gaussian gradient magnitude
//! - Binary morphology, hit-or-miss, propagation and hole filling
//! - Grey-scale morphology, gradient, Laplacian and top-hats
//!
//! Every operation takes an [`NdArray`] and returns one, with boundary
//! handling, origin and output selected through [`FilterOptions`] (or
//! [`morph::BinaryOptions`] for binary morphology).
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use ndimage::{FilterOptions, NdArray, WindowSpec};
//!
//! let image = NdArray::from(array![[0u8, 0, 0], [0, 9, 0], [0, 0, 0]]);
//! let eroded = ndimage::morph::binary_erosion(&image, &Default::default()).unwrap();
//! assert_eq!(eroded.to_vec_f64().iter().sum::<f64>(), 0.0);
//!
//! let dilated =
//!     ndimage::morph::grey_dilation(&image, &WindowSpec::size(3usize), &FilterOptions::default())
//!         .unwrap();
//! assert!(dilated.to_vec_f64().iter().all(|&v| v == 9.0));
//! ```

// Re-export core types (arrays, options and windows used everywhere)
pub use ndimage_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use ndimage_filter as filter;
pub use ndimage_morph as morph;
