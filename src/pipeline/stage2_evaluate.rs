use tracing::{info, warn};

use crate::error::{EvalError, Result};
use crate::model::coverage::Coverage;
use crate::model::grid::GridPrediction;
use crate::model::hit_rate::{InverseHitRate, hit_counts, inverse_hit_rates, maximum_hit_rate};
use crate::model::points::TimedPoints;
use crate::model::top_slice::slice_size;
use crate::report::CoverageRow;

#[derive(Debug, Clone)]
pub struct Stage2Inputs<'a> {
    pub prediction: &'a GridPrediction,
    pub points: &'a TimedPoints,
    pub coverages: &'a [Coverage],
    pub include_maximum: bool,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub rows: Vec<CoverageRow>,
    pub n_events: usize,
    pub n_events_in_grid: usize,
    pub n_cells_valid: usize,
}

pub fn run_stage2(inputs: &Stage2Inputs<'_>) -> Result<Stage2Output> {
    let prediction = inputs.prediction;
    let points = inputs.points;
    if points.is_empty() {
        return Err(EvalError::Domain(
            "no events to evaluate the prediction against".to_string(),
        ));
    }
    let n_cells_valid = prediction.intensity().valid_count();
    let n_events_in_grid = count_in_grid(prediction, points);
    if n_events_in_grid < points.len() {
        warn!(
            outside = points.len() - n_events_in_grid,
            "events outside the grid count as misses"
        );
    }

    let counts = hit_counts(prediction, points, inputs.coverages.iter().copied())?;
    let maximum = if inputs.include_maximum {
        Some(maximum_hit_rate(
            prediction,
            points,
            inputs.coverages.iter().copied(),
        )?)
    } else {
        None
    };

    let mut rows = Vec::with_capacity(counts.len());
    for (coverage, count) in counts {
        rows.push(CoverageRow {
            coverage,
            flagged_cells: slice_size(n_cells_valid, coverage.fraction()),
            hits: count.hits,
            total: count.total,
            hit_rate: count.rate()?,
            maximum_hit_rate: maximum.as_ref().and_then(|m| m.get(&coverage).copied()),
        });
    }
    info!(
        coverages = rows.len(),
        events = points.len(),
        in_grid = n_events_in_grid,
        "computed hit rates"
    );

    Ok(Stage2Output {
        rows,
        n_events: points.len(),
        n_events_in_grid,
        n_cells_valid,
    })
}

pub fn run_stage2_inverse(
    prediction: &GridPrediction,
    points: &TimedPoints,
) -> Result<Vec<InverseHitRate>> {
    let levels = inverse_hit_rates(prediction, points)?;
    info!(levels = levels.len(), "computed inverse hit rates");
    Ok(levels)
}

pub fn count_in_grid(prediction: &GridPrediction, points: &TimedPoints) -> usize {
    points
        .coords()
        .filter(|&(x, y)| prediction.cell_index(x, y).is_some())
        .count()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_evaluate.rs"]
mod tests;
