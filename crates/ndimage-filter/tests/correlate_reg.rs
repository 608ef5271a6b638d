//! Correlation and convolution regression test
//!
//! Checks correlate/convolve, their 1-d forms and the boundary modes
//! against literal values, then verifies the convolution identity on random
//! inputs for every mode and several dtypes.

use ndarray::{ArrayD, Axis, IxDyn};
use ndimage_core::{BoundaryMode, DType, FilterOptions, NdArray, Output, PerAxis};
use ndimage_filter::{convolve, convolve1d, correlate, correlate1d};
use ndimage_test::{RegParams, array_from, random_array};

const MODES: [BoundaryMode; 5] = [
    BoundaryMode::Nearest,
    BoundaryMode::Wrap,
    BoundaryMode::Reflect,
    BoundaryMode::Mirror,
    BoundaryMode::Constant,
];

#[test]
fn correlate_reg_literal() {
    let mut rp = RegParams::new("correlate_literal");

    for dtype in DType::NUMERIC {
        let x = array_from(&[3], &[1.0, 2.0, 3.0], dtype);
        let opts = FilterOptions::default();

        // Identity kernel returns the input unchanged
        let id = correlate1d(&x, &[1.0], 0, &opts).expect("correlate1d identity");
        rp.compare_arrays(&x, &id);

        let c = correlate1d(&x, &[1.0, 2.0, 3.0], 0, &opts).expect("correlate1d");
        rp.compare_slice(&[9.0, 14.0, 17.0], &c, 0.0);
        let v = convolve1d(&x, &[1.0, 2.0, 3.0], 0, &opts).expect("convolve1d");
        rp.compare_slice(&[7.0, 10.0, 15.0], &v, 0.0);
        rp.compare_dtype(dtype, &v);
    }

    // Out-of-bounds handling with kernel [1, 0]
    let x = array_from(&[3], &[1.0, 2.0, 3.0], DType::F64);
    let expected: [(BoundaryMode, [f64; 3]); 5] = [
        (BoundaryMode::Nearest, [1.0, 1.0, 2.0]),
        (BoundaryMode::Wrap, [3.0, 1.0, 2.0]),
        (BoundaryMode::Reflect, [1.0, 1.0, 2.0]),
        (BoundaryMode::Mirror, [2.0, 1.0, 2.0]),
        (BoundaryMode::Constant, [0.0, 1.0, 2.0]),
    ];
    for (mode, values) in expected {
        let opts = FilterOptions::with_mode(mode);
        let c = correlate1d(&x, &[1.0, 0.0], 0, &opts).expect("correlate1d mode");
        rp.compare_slice(&values, &c, 0.0);
        let k = ArrayD::from_shape_vec(IxDyn(&[2]), vec![1.0, 0.0]).expect("kernel");
        let n = correlate(&x, &k, &opts).expect("correlate mode");
        rp.compare_slice(&values, &n, 0.0);
    }

    // Constant mode uses cval
    let opts = FilterOptions::with_mode(BoundaryMode::Constant).cval(5.0);
    let c = correlate1d(&x, &[1.0, 0.0], 0, &opts).expect("correlate1d cval");
    rp.compare_slice(&[5.0, 1.0, 2.0], &c, 0.0);

    // 2-d kernels
    let x = array_from(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], DType::I32);
    let k = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 0.0, 0.0, 1.0]).expect("kernel");
    let opts = FilterOptions::default();
    let c = correlate(&x, &k, &opts).expect("correlate 2d");
    rp.compare_slice(&[2.0, 3.0, 5.0, 5.0, 6.0, 8.0], &c, 0.0);
    rp.compare_dtype(DType::I32, &c);
    let v = convolve(&x, &k, &opts).expect("convolve 2d");
    rp.compare_slice(&[6.0, 8.0, 9.0, 9.0, 11.0, 12.0], &v, 0.0);

    // 1-d correlation along the last axis via a negative index
    let c = correlate1d(&x, &[1.0, 1.0], -1, &opts).expect("correlate1d axis -1");
    rp.compare_slice(&[2.0, 3.0, 5.0, 8.0, 9.0, 11.0], &c, 0.0);

    assert!(rp.cleanup(), "correlate_literal regression test failed");
}

#[test]
fn correlate_reg_origin() {
    let mut rp = RegParams::new("correlate_origin");

    let x = array_from(&[3], &[1.0, 2.0, 3.0], DType::F64);
    let w = [1.0, 1.0];
    let opts = FilterOptions::default().origin(-1isize);
    let c = correlate1d(&x, &w, 0, &opts).expect("correlate1d origin -1");
    rp.compare_slice(&[3.0, 5.0, 6.0], &c, 0.0);
    let v = convolve1d(&x, &w, 0, &opts).expect("convolve1d origin -1");
    rp.compare_slice(&[2.0, 3.0, 5.0], &v, 0.0);

    // Origins beyond the half-extent are rejected
    let bad = FilterOptions::default().origin(1isize);
    rp.compare_values(1.0, correlate1d(&x, &w, 0, &bad).is_err() as u8 as f64, 0.0);
    let bad = FilterOptions::default().origin(-2isize);
    let k = ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0, 1.0, 1.0]).expect("kernel");
    rp.compare_values(1.0, correlate(&x, &k, &bad).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "correlate_origin regression test failed");
}

#[test]
fn correlate_reg_output() {
    let mut rp = RegParams::new("correlate_output");

    let x = array_from(&[4], &[1.0, 2.0, 3.0, 4.0], DType::I16);

    // Requested dtype is always honoured
    let opts = FilterOptions::default().dtype(DType::F32);
    let c = correlate1d(&x, &[1.0, 1.0, 1.0], 0, &opts).expect("correlate1d f32");
    rp.compare_dtype(DType::F32, &c);

    // Non-integral weights promote integer input
    let c = correlate1d(&x, &[0.25, 0.5, 0.25], 0, &FilterOptions::default()).expect("promote");
    rp.compare_dtype(DType::F64, &c);
    rp.compare_slice(&[1.25, 2.0, 3.0, 3.75], &c, 1e-12);

    // A supplied array is written and handed back in its own dtype
    let opts = FilterOptions {
        output: Output::Array(NdArray::zeros(&[4], DType::U8)),
        ..Default::default()
    };
    let c = correlate1d(&x, &[0.25, 0.5, 0.25], 0, &opts).expect("output array");
    rp.compare_dtype(DType::U8, &c);
    rp.compare_slice(&[1.0, 2.0, 3.0, 3.0], &c, 0.0);

    // Boolean output of a weighted sum is refused
    let opts = FilterOptions::default().dtype(DType::Bool);
    rp.compare_values(1.0, correlate1d(&x, &[1.0], 0, &opts).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "correlate_output regression test failed");
}

#[test]
fn correlate_reg_convolution_identity() {
    let mut rp = RegParams::new("correlate_identity");

    let k = ArrayD::from_shape_vec(
        IxDyn(&[2, 3, 2]),
        vec![1.0, -2.0, 0.0, 3.0, 1.0, 1.0, -1.0, 2.0, 4.0, 0.0, -3.0, 1.0],
    )
    .expect("kernel");
    let mut reversed = k.clone();
    for axis in 0..3 {
        reversed.invert_axis(Axis(axis));
    }

    for (seed, dtype) in [(1, DType::I16), (2, DType::I64), (3, DType::F32), (4, DType::F64)] {
        let x = random_array(&[5, 6, 4], dtype, seed);
        for mode in MODES {
            let opts = FilterOptions::with_mode(mode).cval(2.0);
            let conv = convolve(&x, &k, &opts).expect("convolve");
            // odd axis keeps origin 0, even axes shift to -1
            let ropts = opts.clone().origin(vec![-1isize, 0, -1]);
            let corr = correlate(&x, &reversed, &ropts).expect("correlate reversed");
            rp.compare_arrays(&corr, &conv);
        }
    }

    // The 1-d forms agree with the N-d forms along each axis
    let x = random_array(&[7, 5], DType::F64, 9);
    let w = [0.5, -1.0, 2.0, 0.25];
    for axis in 0..2 {
        for mode in MODES {
            let opts = FilterOptions::with_mode(mode);
            let mut shape = vec![1; 2];
            shape[axis] = w.len();
            let k = ArrayD::from_shape_vec(IxDyn(&shape), w.to_vec()).expect("kernel");
            let one = convolve1d(&x, &w, axis as isize, &opts).expect("convolve1d");
            let nd = convolve(&x, &k, &opts).expect("convolve");
            rp.compare_arrays_close(&nd, &one, 1e-12);
        }
    }

    assert!(rp.cleanup(), "correlate_identity regression test failed");
}

#[test]
fn correlate_reg_per_axis_modes() {
    let mut rp = RegParams::new("correlate_per_axis");

    let x = random_array(&[4, 6], DType::F64, 11);
    let modes = vec![BoundaryMode::Wrap, BoundaryMode::Nearest];
    let opts = FilterOptions {
        mode: PerAxis::Each(modes.clone()),
        ..Default::default()
    };
    for (axis, mode) in modes.iter().enumerate() {
        let per_axis = correlate1d(&x, &[1.0, 2.0, 1.0], axis as isize, &opts).expect("per-axis");
        let single = correlate1d(&x, &[1.0, 2.0, 1.0], axis as isize, &FilterOptions::with_mode(*mode))
            .expect("single");
        rp.compare_arrays(&single, &per_axis);
    }

    let k = ArrayD::from_elem(IxDyn(&[3, 3]), 1.0);
    rp.compare_values(1.0, correlate(&x, &k, &opts).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "correlate_per_axis regression test failed");
}
