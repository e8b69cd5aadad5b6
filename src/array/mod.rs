//! Dense n-dimensional `f64` arrays with an explicit validity mask.
//!
//! Values and mask live in parallel row-major buffers. A position is valid
//! when it is not masked and its value is not NaN; only valid positions take
//! part in ranking and counting.

use crate::error::{EvalError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct MaskedArray {
    shape: Vec<usize>,
    values: Vec<f64>,
    mask: Vec<bool>,
}

impl MaskedArray {
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        check_shape(&shape, values.len())?;
        let mask = vec![false; values.len()];
        Ok(Self {
            shape,
            values,
            mask,
        })
    }

    /// One-dimensional array with nothing masked.
    pub fn from_vec(values: Vec<f64>) -> Self {
        let shape = vec![values.len()];
        let mask = vec![false; values.len()];
        Self {
            shape,
            values,
            mask,
        }
    }

    /// Builds a 2-D array from equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(EvalError::InvalidArgument(format!(
                    "row {idx} has {} columns, expected {n_cols}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Self::new(vec![n_rows, n_cols], values)
    }

    /// `None` entries become masked positions.
    pub fn from_options(shape: Vec<usize>, values: Vec<Option<f64>>) -> Result<Self> {
        check_shape(&shape, values.len())?;
        let mask = values.iter().map(|v| v.is_none()).collect();
        let values = values.into_iter().map(|v| v.unwrap_or(0.0)).collect();
        Ok(Self {
            shape,
            values,
            mask,
        })
    }

    /// Replaces the mask; `true` marks a position as excluded.
    pub fn with_mask(mut self, mask: Vec<bool>) -> Result<Self> {
        if mask.len() != self.values.len() {
            return Err(EvalError::InvalidArgument(format!(
                "mask has {} entries, array has {}",
                mask.len(),
                self.values.len()
            )));
        }
        self.mask = mask;
        Ok(self)
    }

    pub fn reshape(mut self, shape: Vec<usize>) -> Result<Self> {
        check_shape(&shape, self.values.len())?;
        self.shape = shape;
        Ok(self)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// `false` for masked, NaN and out-of-range positions.
    pub fn is_valid(&self, idx: usize) -> bool {
        idx < self.values.len() && !self.mask[idx] && !self.values[idx].is_nan()
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        if self.is_valid(idx) {
            Some(self.values[idx])
        } else {
            None
        }
    }

    pub fn valid_count(&self) -> usize {
        (0..self.values.len()).filter(|&i| self.is_valid(i)).count()
    }

    /// Flat index and value of every valid position, in index order.
    pub fn iter_valid(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.is_valid(*i))
            .map(|(i, &v)| (i, v))
    }

    pub fn valid_sum(&self) -> f64 {
        self.iter_valid().map(|(_, v)| v).sum()
    }
}

fn check_shape(shape: &[usize], len: usize) -> Result<()> {
    let expected: usize = shape.iter().product();
    if shape.is_empty() || expected != len {
        return Err(EvalError::InvalidArgument(format!(
            "shape {shape:?} does not hold {len} values"
        )));
    }
    Ok(())
}

/// Boolean array aligned with the [`MaskedArray`] it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMask {
    shape: Vec<usize>,
    selected: Vec<bool>,
}

impl SelectionMask {
    pub fn empty(shape: &[usize]) -> Self {
        let len = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            selected: vec![false; len],
        }
    }

    pub(crate) fn select(&mut self, idx: usize) {
        self.selected[idx] = true;
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.selected
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.selected.get(idx).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.selected
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/array/mod.rs"]
mod tests;
