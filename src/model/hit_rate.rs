use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{EvalError, Result};
use crate::model::coverage::Coverage;
use crate::model::grid::GridPrediction;
use crate::model::points::TimedPoints;
use crate::model::top_slice::{rank_order, top_slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HitCount {
    pub hits: usize,
    pub total: usize,
}

impl HitCount {
    pub fn rate(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(EvalError::Domain(
                "hit rate is undefined for an empty event set".to_string(),
            ));
        }
        Ok(self.hits as f64 / self.total as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InverseHitRate {
    pub hit_rate: f64,
    pub cells: usize,
    pub coverage_percent: f64,
}

/// Events captured by the top `coverage` percent of cells, per coverage.
///
/// Events outside the grid count towards `total` but never as hits.
pub fn hit_counts(
    prediction: &GridPrediction,
    points: &TimedPoints,
    coverages: impl IntoIterator<Item = Coverage>,
) -> Result<BTreeMap<Coverage, HitCount>> {
    let cells = event_cells(prediction, points);
    let total = points.len();
    let mut out = BTreeMap::new();
    for coverage in coverages {
        if out.contains_key(&coverage) {
            continue;
        }
        let covered = top_slice(prediction.intensity(), coverage.fraction())?;
        let hits = cells
            .iter()
            .flatten()
            .filter(|&&cell| covered.is_selected(cell))
            .count();
        debug!(
            coverage = coverage.as_percent(),
            flagged_cells = covered.count(),
            hits,
            total,
            "evaluated coverage"
        );
        out.insert(coverage, HitCount { hits, total });
    }
    Ok(out)
}

/// Fraction of events captured by the top `coverage` percent of cells.
pub fn hit_rates(
    prediction: &GridPrediction,
    points: &TimedPoints,
    coverages: impl IntoIterator<Item = Coverage>,
) -> Result<BTreeMap<Coverage, f64>> {
    if points.is_empty() {
        return Err(EvalError::Domain(
            "hit rate is undefined for an empty event set".to_string(),
        ));
    }
    hit_counts(prediction, points, coverages)?
        .into_iter()
        .map(|(coverage, count)| count.rate().map(|rate| (coverage, rate)))
        .collect()
}

/// Best hit rate any prediction on this grid could reach: the prediction
/// whose risk is the observed event count per cell.
pub fn maximum_hit_rate(
    grid: &GridPrediction,
    points: &TimedPoints,
    coverages: impl IntoIterator<Item = Coverage>,
) -> Result<BTreeMap<Coverage, f64>> {
    let perfect = GridPrediction::from_counts(grid, points)?;
    hit_rates(&perfect, points, coverages)
}

/// For every hit rate the prediction can reach, the fewest flagged cells
/// (and matching coverage) needed to reach it.
pub fn inverse_hit_rates(
    prediction: &GridPrediction,
    points: &TimedPoints,
) -> Result<Vec<InverseHitRate>> {
    if points.is_empty() {
        return Err(EvalError::Domain(
            "hit rate is undefined for an empty event set".to_string(),
        ));
    }
    let mut per_cell = vec![0usize; prediction.intensity().len()];
    for cell in event_cells(prediction, points).into_iter().flatten() {
        per_cell[cell] += 1;
    }

    let order = rank_order(prediction.intensity());
    let n_valid = order.len();
    let total = points.len() as f64;
    let mut captured = 0usize;
    let mut out = Vec::new();
    for (taken, cell) in order.into_iter().enumerate() {
        if per_cell[cell] == 0 {
            continue;
        }
        captured += per_cell[cell];
        let cells = taken + 1;
        out.push(InverseHitRate {
            hit_rate: captured as f64 / total,
            cells,
            coverage_percent: cells as f64 * 100.0 / n_valid as f64,
        });
    }
    Ok(out)
}

fn event_cells(prediction: &GridPrediction, points: &TimedPoints) -> Vec<Option<usize>> {
    points
        .coords()
        .map(|(x, y)| prediction.cell_index(x, y))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/hit_rate.rs"]
mod tests;
