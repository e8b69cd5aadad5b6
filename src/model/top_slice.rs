use std::cmp::Ordering;

use crate::array::{MaskedArray, SelectionMask};
use crate::error::{EvalError, Result};

/// Marks the `floor(n_valid * fraction)` largest valid values.
///
/// Fractions at or below zero select nothing and fractions at or above one
/// select every valid position. Among equal values the higher flat index is
/// ranked first, so the selected count is always exact.
pub fn top_slice(values: &MaskedArray, fraction: f64) -> Result<SelectionMask> {
    check_fraction(fraction)?;
    let mut ranked: Vec<(usize, f64)> = values.iter_valid().collect();
    let k = slice_size(ranked.len(), fraction);
    let mut mask = SelectionMask::empty(values.shape());
    if k == 0 {
        return Ok(mask);
    }
    if k < ranked.len() {
        ranked.select_nth_unstable_by(k - 1, rank_cmp);
        ranked.truncate(k);
    }
    for (idx, _) in ranked {
        mask.select(idx);
    }
    Ok(mask)
}

/// Number of elements a slice of `fraction` takes out of `n`.
pub fn slice_size(n: usize, fraction: f64) -> usize {
    if fraction <= 0.0 {
        0
    } else if fraction >= 1.0 {
        n
    } else {
        ((n as f64 * fraction).floor() as usize).min(n)
    }
}

/// Valid flat indices in selection order; the first `k` entries are exactly
/// what [`top_slice`] marks for a slice of size `k`.
pub fn rank_order(values: &MaskedArray) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = values.iter_valid().collect();
    ranked.sort_unstable_by(rank_cmp);
    ranked.into_iter().map(|(idx, _)| idx).collect()
}

pub(crate) fn check_fraction(fraction: f64) -> Result<()> {
    if fraction.is_finite() {
        Ok(())
    } else {
        Err(EvalError::InvalidArgument(format!(
            "fraction must be a finite number, got {fraction}"
        )))
    }
}

// value descending, then index descending
fn rank_cmp(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(b.0.cmp(&a.0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/top_slice.rs"]
mod tests;
