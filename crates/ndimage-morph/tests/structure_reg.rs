//! Structuring element regression test
//!
//! Tests generation by rank and connectivity, and growth of elements by
//! iteration, including the scaled origin.

use ndarray::{ArrayD, IxDyn};
use ndimage_core::PerAxis;
use ndimage_morph::{generate_binary_structure, iterate_structure, iterate_structure_with_origin};
use ndimage_test::{RegParams, mask_from};

fn compare_structure(rp: &mut RegParams, expected: &ArrayD<bool>, actual: &ArrayD<bool>) {
    rp.compare_values(expected.ndim() as f64, actual.ndim() as f64, 0.0);
    if expected.shape() == actual.shape() {
        let mismatches = expected.iter().zip(actual).filter(|(e, a)| e != a).count();
        rp.compare_values(0.0, mismatches as f64, 0.0);
    } else {
        rp.compare_values(0.0, 1.0, 0.0);
    }
}

#[test]
fn structure_reg_generate() {
    let mut rp = RegParams::new("structure_generate");

    let s = generate_binary_structure(0, 0);
    compare_structure(&mut rp, &ArrayD::from_elem(IxDyn(&[]), true), &s);
    let s = generate_binary_structure(0, 3);
    rp.compare_values(1.0, s.len() as f64, 0.0);

    compare_structure(&mut rp, &mask_from(&[3], &[1, 1, 1]), &generate_binary_structure(1, 1));
    compare_structure(&mut rp, &mask_from(&[3], &[1, 1, 1]), &generate_binary_structure(1, 2));

    let cross = mask_from(&[3, 3], &[0, 1, 0, 1, 1, 1, 0, 1, 0]);
    let full = mask_from(&[3, 3], &[1; 9]);
    compare_structure(&mut rp, &cross, &generate_binary_structure(2, 0));
    compare_structure(&mut rp, &cross, &generate_binary_structure(2, 1));
    compare_structure(&mut rp, &full, &generate_binary_structure(2, 2));
    compare_structure(&mut rp, &full, &generate_binary_structure(2, 5));

    for (connectivity, count) in [(1, 9.0), (2, 33.0), (3, 65.0), (4, 81.0)] {
        let s = generate_binary_structure(4, connectivity);
        rp.compare_values(count, s.iter().filter(|&&b| b).count() as f64, 0.0);
    }

    assert!(rp.cleanup(), "structure_generate regression test failed");
}

#[test]
fn structure_reg_iterate() {
    let mut rp = RegParams::new("structure_iterate");

    let cross = mask_from(&[3, 3], &[0, 1, 0, 1, 1, 1, 0, 1, 0]);
    let diamond = mask_from(
        &[5, 5],
        &[
            0, 0, 1, 0, 0, //
            0, 1, 1, 1, 0, //
            1, 1, 1, 1, 1, //
            0, 1, 1, 1, 0, //
            0, 0, 1, 0, 0,
        ],
    );
    compare_structure(&mut rp, &diamond, &iterate_structure(&cross, 2).expect("iterate cross"));
    compare_structure(&mut rp, &cross, &iterate_structure(&cross, 1).expect("iterate once"));

    let wedge = mask_from(&[3, 2], &[0, 1, 1, 1, 0, 1]);
    let grown = mask_from(
        &[5, 3],
        &[
            0, 0, 1, //
            0, 1, 1, //
            1, 1, 1, //
            0, 1, 1, //
            0, 0, 1,
        ],
    );
    compare_structure(&mut rp, &grown, &iterate_structure(&wedge, 2).expect("iterate wedge"));

    let (s, origin) =
        iterate_structure_with_origin(&wedge, 2, &PerAxis::All(1)).expect("iterate with origin");
    compare_structure(&mut rp, &grown, &s);
    rp.compare_values(2.0, origin[0] as f64, 0.0);
    rp.compare_values(2.0, origin[1] as f64, 0.0);

    // Three iterations of the full 3x3 box give a 7x7 box
    let full = generate_binary_structure(2, 2);
    let s = iterate_structure(&full, 3).expect("iterate box");
    compare_structure(&mut rp, &ArrayD::from_elem(IxDyn(&[7, 7]), true), &s);

    let empty = ArrayD::from_elem(IxDyn(&[0, 3]), true);
    rp.compare_values(1.0, iterate_structure(&empty, 2).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "structure_iterate regression test failed");
}
