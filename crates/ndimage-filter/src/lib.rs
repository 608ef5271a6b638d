//! ndimage-filter - N-dimensional neighbourhood filters
//!
//! This crate provides the filter family over [`NdArray`](ndimage_core::NdArray):
//!
//! - Correlation and convolution, N-d and 1-d
//! - Uniform (box mean) and Gaussian filters, Gaussian derivatives
//! - Minimum, maximum, rank, percentile and median filters
//! - Filters driven by a caller-supplied function
//! - Prewitt, Sobel and Laplace derivative filters
//!
//! Two engines do the work. [`line`] runs 1-d operations along one axis at a
//! time and serves every separable filter; [`window`] evaluates an arbitrary
//! footprint at every element.

pub mod convolve;
pub mod edge;
mod error;
pub mod generic;
pub mod kernel;
pub mod line;
pub mod rank;
pub mod window;

pub use error::{FilterError, FilterResult};
pub use line::Extremum;

pub use convolve::{
    convolve, convolve1d, correlate, correlate1d, gaussian_filter, gaussian_filter1d,
    gaussian_smooth, uniform_filter, uniform_filter1d,
};
pub use edge::{
    gaussian_gradient_magnitude, gaussian_laplace, generic_gradient_magnitude, generic_laplace,
    laplace, prewitt, sobel,
};
pub use generic::{generic_filter, generic_filter1d};
pub use kernel::{DEFAULT_TRUNCATE, gaussian_kernel1d};
pub use rank::{
    extremum_filter, maximum_filter, maximum_filter1d, median_filter, minimum_filter,
    minimum_filter1d, percentile_filter, rank_filter,
};
