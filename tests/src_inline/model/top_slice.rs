use super::*;
use crate::error::EvalError;

fn arr(values: &[f64]) -> MaskedArray {
    MaskedArray::from_vec(values.to_vec())
}

fn greater_than(values: &[f64], cutoff: f64) -> Vec<bool> {
    values.iter().map(|&v| v > cutoff).collect()
}

#[test]
fn test_top_slice_truncates_fraction() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    // 6 * 0.7 == 4.2
    let mask = top_slice(&arr(&x), 0.7).unwrap();
    assert_eq!(mask.as_slice(), greater_than(&x, 2.0).as_slice());

    // 6 * 0.6 == 3.6
    let mask = top_slice(&arr(&x), 0.6).unwrap();
    assert_eq!(mask.as_slice(), greater_than(&x, 3.0).as_slice());
}

#[test]
fn test_top_slice_full_and_empty() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let mask = top_slice(&arr(&x), 1.0).unwrap();
    assert_eq!(mask.count(), 6);

    let mask = top_slice(&arr(&x), 0.0).unwrap();
    assert_eq!(mask.count(), 0);
}

#[test]
fn test_top_slice_full_includes_non_positive() {
    let x = [-3.0, 0.0, 0.0, 2.0];
    let mask = top_slice(&arr(&x), 1.0).unwrap();
    assert_eq!(mask.as_slice(), &[true, true, true, true]);
}

#[test]
fn test_top_slice_out_of_range_fractions_clamp() {
    let x = [1.0, 2.0, 3.0];
    assert_eq!(top_slice(&arr(&x), -0.5).unwrap().count(), 0);
    assert_eq!(top_slice(&arr(&x), 7.0).unwrap().count(), 3);
}

#[test]
fn test_top_slice_rejects_non_finite_fraction() {
    let x = arr(&[1.0, 2.0]);
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = top_slice(&x, bad).unwrap_err();
        assert!(matches!(err, EvalError::InvalidArgument(_)));
    }
}

#[test]
fn test_top_slice_not_one_dim() {
    let x = MaskedArray::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let mask = top_slice(&x, 0.7).unwrap();
    assert_eq!(mask.shape(), &[2, 3]);
    assert_eq!(mask.as_slice(), &[false, false, true, true, true, true]);
}

#[test]
fn test_top_slice_equal_input() {
    let mask = top_slice(&arr(&[1.0, 1.0, 1.0, 2.0, 3.0, 4.0]), 0.7).unwrap();
    assert_eq!(mask.as_slice(), &[false, false, true, true, true, true]);

    let mask = top_slice(&arr(&[2.0, 3.0, 4.0, 1.0, 1.0, 1.0]), 0.7).unwrap();
    assert_eq!(mask.as_slice(), &[true, true, true, false, false, true]);
}

#[test]
fn test_top_slice_masked() {
    let data = arr(&[1.0, 2.0, 3.0, 0.0, 4.0, 5.0])
        .with_mask(vec![true, false, false, false, true, false])
        .unwrap();

    let s = top_slice(&data, 1.0).unwrap();
    assert_eq!(s.as_slice(), &[false, true, true, true, false, true]);

    let s = top_slice(&data, 0.0).unwrap();
    assert_eq!(s.count(), 0);

    let s = top_slice(&data, 0.5).unwrap();
    assert_eq!(s.as_slice(), &[false, false, true, false, false, true]);

    let s = top_slice(&data, 0.4).unwrap();
    assert_eq!(s.as_slice(), &[false, false, false, false, false, true]);
}

#[test]
fn test_top_slice_skips_nan() {
    let data = arr(&[f64::NAN, 1.0, 2.0, 3.0]);
    let s = top_slice(&data, 1.0).unwrap();
    assert_eq!(s.as_slice(), &[false, true, true, true]);
    // 3 valid * 0.5 == 1.5
    let s = top_slice(&data, 0.5).unwrap();
    assert_eq!(s.as_slice(), &[false, false, false, true]);
}

#[test]
fn test_top_slice_empty_input() {
    let s = top_slice(&arr(&[]), 0.5).unwrap();
    assert_eq!(s.count(), 0);
    assert_eq!(s.shape(), &[0]);
}

#[test]
fn test_slice_size() {
    assert_eq!(slice_size(6, 0.7), 4);
    assert_eq!(slice_size(6, 0.6), 3);
    assert_eq!(slice_size(8, 0.49), 3);
    assert_eq!(slice_size(8, 0.5), 4);
    assert_eq!(slice_size(8, 1.0), 8);
    assert_eq!(slice_size(8, -1.0), 0);
    assert_eq!(slice_size(0, 0.9), 0);
}

#[test]
fn test_rank_order_prefixes_match_top_slice() {
    let data = arr(&[2.0, 3.0, 4.0, 1.0, 1.0, 1.0, 3.0])
        .with_mask(vec![false, false, false, false, true, false, false])
        .unwrap();
    let order = rank_order(&data);
    assert_eq!(order, vec![2, 6, 1, 0, 5, 3]);
    let n = order.len();
    for k in 0..=n {
        let fraction = k as f64 / n as f64;
        let mask = top_slice(&data, fraction).unwrap();
        let k_eff = slice_size(n, fraction);
        let mut expected = vec![false; data.len()];
        for &idx in &order[..k_eff] {
            expected[idx] = true;
        }
        assert_eq!(mask.as_slice(), expected.as_slice(), "k = {k}");
    }
}
