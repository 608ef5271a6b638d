//! ndimage-test - Regression test framework for the ndimage crates
//!
//! Provides [`RegParams`], which accumulates the outcome of a series of
//! comparisons and reports them at the end, plus a handful of array
//! fixtures shared by the crates' regression tests.
//!
//! # Usage
//!
//! ```ignore
//! use ndimage_test::RegParams;
//!
//! let mut rp = RegParams::new("correlate");
//! rp.compare_slice(&[9.0, 14.0, 17.0], &out, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_VERBOSE`: report passing comparisons too

mod params;

pub use params::RegParams;

use ndarray::{ArrayD, IxDyn};
use ndimage_core::{DType, NdArray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build an array of `dtype` from row-major `values`.
///
/// # Panics
///
/// Panics if `values.len()` does not match `shape`.
pub fn array_from(shape: &[usize], values: &[f64], dtype: DType) -> NdArray {
    let data = ArrayD::from_shape_vec(IxDyn(shape), values.to_vec())
        .unwrap_or_else(|e| panic!("fixture shape {shape:?}: {e}"));
    NdArray::from_f64(data, dtype)
}

/// Build a boolean array from 0/1 values.
pub fn mask_from(shape: &[usize], values: &[u8]) -> ArrayD<bool> {
    ArrayD::from_shape_vec(IxDyn(shape), values.iter().map(|&v| v != 0).collect())
        .unwrap_or_else(|e| panic!("fixture shape {shape:?}: {e}"))
}

/// The 3x5 sample used by the extremum regression tests.
pub fn sample_3x5(dtype: DType) -> NdArray {
    array_from(
        &[3, 5],
        &[
            3.0, 2.0, 5.0, 1.0, 4.0, //
            7.0, 6.0, 9.0, 3.0, 5.0, //
            5.0, 8.0, 3.0, 7.0, 1.0,
        ],
        dtype,
    )
}

/// The 3x5 sample used by the rank and derivative regression tests.
pub fn sample_3x5_b(dtype: DType) -> NdArray {
    array_from(
        &[3, 5],
        &[
            3.0, 2.0, 5.0, 1.0, 4.0, //
            5.0, 8.0, 3.0, 7.0, 1.0, //
            5.0, 6.0, 9.0, 3.0, 5.0,
        ],
        dtype,
    )
}

/// Deterministic pseudo-random integers in `0..100`, stored as `dtype`.
///
/// The range is representable by every numeric dtype.
pub fn random_array(shape: &[usize], dtype: DType, seed: u64) -> NdArray {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = shape.iter().product();
    let values: Vec<f64> = (0..len)
        .map(|_| rng.random_range(0..100u32) as f64)
        .collect();
    array_from(shape, &values, dtype)
}

/// Deterministic pseudo-random boolean array with roughly `density` true.
pub fn random_mask(shape: &[usize], density: f64, seed: u64) -> ArrayD<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = shape.iter().product();
    let values: Vec<bool> = (0..len).map(|_| rng.random_bool(density)).collect();
    ArrayD::from_shape_vec(IxDyn(shape), values)
        .unwrap_or_else(|e| panic!("fixture shape {shape:?}: {e}"))
}
