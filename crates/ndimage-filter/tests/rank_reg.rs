//! Order-statistic filter regression test
//!
//! Tests minimum/maximum, rank, percentile and median filters:
//!   (1) literal results for sizes, footprints and origins, every dtype
//!   (2) separable and general routing agree
//!   (3) rank and median filters agree with a brute-force sort
//!   (4) argument errors

use ndarray::array;
use ndimage_core::{BoundaryMode, DType, Error, FilterOptions, NdArray, WindowSpec};
use ndimage_filter::{
    FilterError, generic_filter, maximum_filter, maximum_filter1d, median_filter, minimum_filter,
    minimum_filter1d, percentile_filter, rank_filter,
};
use ndimage_test::{RegParams, array_from, random_array, sample_3x5, sample_3x5_b};

const MODES: [BoundaryMode; 5] = [
    BoundaryMode::Nearest,
    BoundaryMode::Wrap,
    BoundaryMode::Reflect,
    BoundaryMode::Mirror,
    BoundaryMode::Constant,
];

fn footprint_a() -> WindowSpec {
    WindowSpec::footprint(array![[true, false, true], [true, true, false]])
}

fn footprint_b() -> WindowSpec {
    WindowSpec::footprint(array![[true, false, true], [false, true, false]])
}

#[test]
fn rank_reg_extremum_literal() {
    let mut rp = RegParams::new("rank_extremum");

    for dtype in DType::NUMERIC {
        let row = array_from(&[5], &[3.0, 2.0, 5.0, 1.0, 4.0], dtype);
        let opts = FilterOptions::default();
        let min = minimum_filter1d(&row, 3, 0, &opts).expect("minimum_filter1d");
        rp.compare_slice(&[2.0, 2.0, 1.0, 1.0, 1.0], &min, 0.0);
        rp.compare_dtype(dtype, &min);
        let max = maximum_filter1d(&row, 3, 0, &opts).expect("maximum_filter1d");
        rp.compare_slice(&[3.0, 5.0, 5.0, 5.0, 4.0], &max, 0.0);

        let a = sample_3x5(dtype);
        let size = WindowSpec::size([2usize, 3]);
        let min = minimum_filter(&a, &size, &opts).expect("minimum size");
        rp.compare_slice(
            &[2.0, 2.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 5.0, 3.0, 3.0, 1.0, 1.0],
            &min,
            0.0,
        );
        let max = maximum_filter(&a, &size, &opts).expect("maximum size");
        rp.compare_slice(
            &[3.0, 5.0, 5.0, 5.0, 4.0, 7.0, 9.0, 9.0, 9.0, 5.0, 8.0, 9.0, 9.0, 9.0, 7.0],
            &max,
            0.0,
        );

        let min = minimum_filter(&a, &footprint_a(), &opts).expect("minimum footprint");
        rp.compare_slice(
            &[2.0, 2.0, 1.0, 1.0, 1.0, 2.0, 3.0, 1.0, 3.0, 1.0, 5.0, 5.0, 3.0, 3.0, 1.0],
            &min,
            0.0,
        );
        let max = maximum_filter(&a, &footprint_a(), &opts).expect("maximum footprint");
        rp.compare_slice(
            &[3.0, 5.0, 5.0, 5.0, 4.0, 7.0, 7.0, 9.0, 9.0, 5.0, 7.0, 9.0, 8.0, 9.0, 7.0],
            &max,
            0.0,
        );
    }

    assert!(rp.cleanup(), "rank_extremum regression test failed");
}

#[test]
fn rank_reg_extremum_origin() {
    let mut rp = RegParams::new("rank_extremum_origin");

    let a = sample_3x5(DType::F32);
    let opts = FilterOptions::default().origin(-1isize);
    let min = minimum_filter(&a, &footprint_a(), &opts).expect("minimum origin -1");
    rp.compare_slice(
        &[3.0, 1.0, 3.0, 1.0, 1.0, 5.0, 3.0, 3.0, 1.0, 1.0, 3.0, 3.0, 1.0, 1.0, 1.0],
        &min,
        0.0,
    );
    let max = maximum_filter(&a, &footprint_a(), &opts).expect("maximum origin -1");
    rp.compare_slice(
        &[7.0, 9.0, 9.0, 5.0, 5.0, 9.0, 8.0, 9.0, 7.0, 5.0, 8.0, 8.0, 7.0, 7.0, 7.0],
        &max,
        0.0,
    );

    let opts = FilterOptions::default().origin([-1isize, 0]);
    let min = minimum_filter(&a, &footprint_a(), &opts).expect("minimum origin [-1, 0]");
    rp.compare_slice(
        &[2.0, 3.0, 1.0, 3.0, 1.0, 5.0, 5.0, 3.0, 3.0, 1.0, 5.0, 3.0, 3.0, 1.0, 1.0],
        &min,
        0.0,
    );

    assert!(rp.cleanup(), "rank_extremum_origin regression test failed");
}

#[test]
fn rank_reg_rank_literal() {
    let mut rp = RegParams::new("rank_literal");

    for dtype in DType::NUMERIC {
        let row = array_from(&[5], &[3.0, 2.0, 5.0, 1.0, 4.0], dtype);
        let opts = FilterOptions::default();
        let size3 = WindowSpec::size(3usize);
        for rank in [1isize, -2] {
            let r = rank_filter(&row, rank, &size3, &opts).expect("rank_filter 1d");
            rp.compare_slice(&[3.0, 3.0, 2.0, 4.0, 4.0], &r, 0.0);
            rp.compare_dtype(dtype, &r);
        }

        let b = sample_3x5_b(dtype);
        let size = WindowSpec::size([2usize, 3]);
        let r = rank_filter(&b, 1, &size, &opts).expect("rank 1");
        rp.compare_slice(
            &[2.0, 2.0, 1.0, 1.0, 1.0, 3.0, 3.0, 2.0, 1.0, 1.0, 5.0, 5.0, 3.0, 3.0, 1.0],
            &r,
            0.0,
        );
        let r = rank_filter(&b, -2, &size, &opts).expect("rank -2");
        rp.compare_slice(
            &[3.0, 5.0, 5.0, 5.0, 4.0, 5.0, 5.0, 7.0, 5.0, 4.0, 6.0, 8.0, 8.0, 7.0, 5.0],
            &r,
            0.0,
        );
        let median_expected = [
            3.0, 3.0, 2.0, 4.0, 4.0, 5.0, 5.0, 5.0, 4.0, 4.0, 5.0, 6.0, 7.0, 5.0, 5.0,
        ];
        let r = rank_filter(&b, 3, &size, &opts).expect("rank 3");
        rp.compare_slice(&median_expected, &r, 0.0);
        let m = median_filter(&b, &size, &opts).expect("median");
        rp.compare_slice(&median_expected, &m, 0.0);

        let fp_expected = [
            3.0, 3.0, 2.0, 4.0, 4.0, 3.0, 5.0, 2.0, 5.0, 1.0, 5.0, 5.0, 8.0, 3.0, 5.0,
        ];
        let r = rank_filter(&b, 1, &footprint_b(), &opts).expect("rank footprint");
        rp.compare_slice(&fp_expected, &r, 0.0);
        let m = median_filter(&b, &footprint_b(), &opts).expect("median footprint");
        rp.compare_slice(&fp_expected, &m, 0.0);
    }

    let b = sample_3x5_b(DType::I32);
    let opts = FilterOptions::default().origin(-1isize);
    let r = rank_filter(&b, 1, &footprint_b(), &opts).expect("rank origin -1");
    rp.compare_slice(
        &[5.0, 2.0, 5.0, 1.0, 1.0, 5.0, 8.0, 3.0, 5.0, 5.0, 6.0, 6.0, 5.0, 5.0, 5.0],
        &r,
        0.0,
    );
    let opts = FilterOptions::default().origin([-1isize, 0]);
    let m = median_filter(&b, &footprint_b(), &opts).expect("median origin [-1, 0]");
    rp.compare_slice(
        &[3.0, 5.0, 2.0, 5.0, 1.0, 5.0, 5.0, 8.0, 3.0, 5.0, 5.0, 6.0, 6.0, 5.0, 5.0],
        &m,
        0.0,
    );

    assert!(rp.cleanup(), "rank_literal regression test failed");
}

#[test]
fn rank_reg_routing() {
    let mut rp = RegParams::new("rank_routing");

    // Box windows run as separable passes; the same offsets given as a
    // padded footprint go through the general engine.
    let boxed = WindowSpec::size([2usize, 3]);
    let padded = WindowSpec::footprint(array![
        [false, true, true, true],
        [false, true, true, true]
    ]);
    for (seed, dtype) in [(21, DType::U8), (22, DType::I64), (23, DType::F64)] {
        let x = random_array(&[6, 7], dtype, seed);
        for mode in MODES {
            let opts = FilterOptions::with_mode(mode).cval(50.0);
            let a = minimum_filter(&x, &boxed, &opts).expect("separable minimum");
            let b = minimum_filter(&x, &padded, &opts).expect("general minimum");
            rp.compare_arrays(&a, &b);
            let a = maximum_filter(&x, &boxed, &opts).expect("separable maximum");
            let b = maximum_filter(&x, &padded, &opts).expect("general maximum");
            rp.compare_arrays(&a, &b);
        }
    }

    // Rank 0 and N-1 are the extremum filters
    let x = random_array(&[5, 5], DType::I16, 24);
    let opts = FilterOptions::default();
    let fp = footprint_a();
    let min = minimum_filter(&x, &fp, &opts).expect("minimum");
    rp.compare_arrays(&min, &rank_filter(&x, 0, &fp, &opts).expect("rank 0"));
    rp.compare_arrays(&min, &percentile_filter(&x, 0.0, &fp, &opts).expect("percentile 0"));
    let max = maximum_filter(&x, &fp, &opts).expect("maximum");
    rp.compare_arrays(&max, &rank_filter(&x, -1, &fp, &opts).expect("rank -1"));
    rp.compare_arrays(&max, &percentile_filter(&x, 100.0, &fp, &opts).expect("percentile 100"));

    // Six-element window: percentiles round down over N - 1
    let x = sample_3x5(DType::I32);
    let six = WindowSpec::size([2usize, 3]);
    let min = minimum_filter(&x, &six, &opts).expect("minimum 2x3");
    rp.compare_arrays(&min, &percentile_filter(&x, 17.0, &six, &opts).expect("percentile 17"));
    let rank2 = rank_filter(&x, 2, &six, &opts).expect("rank 2");
    rp.compare_arrays(&rank2, &percentile_filter(&x, 50.0, &six, &opts).expect("percentile 50"));
    let rank3 = rank_filter(&x, 3, &six, &opts).expect("rank 3");
    rp.compare_arrays(&rank3, &median_filter(&x, &six, &opts).expect("median 2x3"));

    assert!(rp.cleanup(), "rank_routing regression test failed");
}

#[test]
fn rank_reg_brute_force() {
    let mut rp = RegParams::new("rank_brute_force");

    let fp = WindowSpec::footprint(array![
        [[true, false, true], [false, true, true]],
        [[true, true, false], [true, false, true]]
    ]);
    let count = 8usize;
    let x = random_array(&[4, 5, 6], DType::I32, 31);
    for mode in MODES {
        let opts = FilterOptions::with_mode(mode).cval(-3.0);
        for rank in 0..count {
            let expected = generic_filter(
                &x,
                |v, &r: &usize| {
                    let mut sorted = v.to_vec();
                    sorted.sort_by(|a, b| a.total_cmp(b));
                    sorted[r]
                },
                &rank,
                &fp,
                &opts,
            )
            .expect("generic rank");
            let got = rank_filter(&x, rank as isize, &fp, &opts).expect("rank_filter");
            rp.compare_arrays(&expected, &got);
        }
        for p in [10.0, 37.5, 50.0, 80.0] {
            let rank = (p / 100.0 * (count - 1) as f64).floor() as isize;
            let expected = rank_filter(&x, rank, &fp, &opts).expect("rank");
            let got = percentile_filter(&x, p, &fp, &opts).expect("percentile");
            rp.compare_arrays(&expected, &got);
        }
        let expected = rank_filter(&x, (count / 2) as isize, &fp, &opts).expect("rank N/2");
        rp.compare_arrays(&expected, &median_filter(&x, &fp, &opts).expect("median"));
    }

    assert!(rp.cleanup(), "rank_brute_force regression test failed");
}

#[test]
fn rank_reg_errors() {
    let mut rp = RegParams::new("rank_errors");

    let x = sample_3x5(DType::U8);
    let opts = FilterOptions::default();
    let size = WindowSpec::size(3usize);

    let err = rank_filter(&x, 9, &size, &opts);
    rp.compare_values(
        1.0,
        matches!(err, Err(FilterError::Core(Error::RankOutOfRange { rank: 9, size: 9 }))) as u8 as f64,
        0.0,
    );
    let err = rank_filter(&x, -10, &size, &opts);
    rp.compare_values(1.0, err.is_err() as u8 as f64, 0.0);

    let err = median_filter(&x, &WindowSpec::default(), &opts);
    rp.compare_values(
        1.0,
        matches!(err, Err(FilterError::Core(Error::MissingNeighbourhoodSpec))) as u8 as f64,
        0.0,
    );

    let err = minimum_filter(&x, &WindowSpec::footprint(array![true, true]), &opts);
    rp.compare_values(
        1.0,
        matches!(err, Err(FilterError::Core(Error::ShapeMismatch(_)))) as u8 as f64,
        0.0,
    );

    let err = percentile_filter(&x, 150.0, &size, &opts);
    rp.compare_values(1.0, err.is_err() as u8 as f64, 0.0);

    let bad_origin = FilterOptions::default().origin(2isize);
    let err = median_filter(&x, &size, &bad_origin);
    rp.compare_values(
        1.0,
        matches!(err, Err(FilterError::Core(Error::OriginOutOfBounds { .. }))) as u8 as f64,
        0.0,
    );

    // A zero-rank input is its own neighbourhood
    let s = NdArray::from_elem(&[], 7i8);
    let m = median_filter(&s, &WindowSpec::size(3usize), &opts).expect("zero rank");
    rp.compare_arrays(&s, &m);

    assert!(rp.cleanup(), "rank_errors regression test failed");
}
