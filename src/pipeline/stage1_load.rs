use std::path::Path;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::{EvalError, Result};
use crate::input::{load_events, load_prediction};
use crate::model::grid::GridPrediction;
use crate::model::points::TimedPoints;

#[derive(Debug, Clone, Copy)]
pub struct Stage1Params<'a> {
    pub prediction_path: &'a Path,
    pub events_path: &'a Path,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub prediction: GridPrediction,
    pub points: TimedPoints,
    pub n_events_loaded: usize,
}

pub fn run_stage1(params: &Stage1Params<'_>) -> Result<Stage1Output> {
    if let (Some(start), Some(end)) = (params.start, params.end) {
        if start >= end {
            return Err(EvalError::InvalidArgument(format!(
                "time window is empty: start {start} is not before end {end}"
            )));
        }
    }

    let prediction = load_prediction(params.prediction_path)?;
    let loaded = load_events(params.events_path)?;
    let n_events_loaded = loaded.len();
    let points = restrict_window(loaded, params.start, params.end);

    Ok(Stage1Output {
        prediction,
        points,
        n_events_loaded,
    })
}

pub fn restrict_window(
    points: TimedPoints,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> TimedPoints {
    if start.is_none() && end.is_none() {
        return points;
    }
    let kept = points.between(start, end);
    let dropped = points.len() - kept.len();
    if dropped > 0 {
        warn!(dropped, kept = kept.len(), "events outside the time window were skipped");
    }
    kept
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
