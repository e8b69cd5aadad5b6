use serde::Serialize;

use crate::model::coverage::Coverage;
use crate::model::hit_rate::InverseHitRate;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub prediction: String,
    pub events: String,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub n_rows: usize,
    pub n_cols: usize,
    pub n_cells_valid: usize,
    pub n_events_loaded: usize,
    pub n_events: usize,
    pub n_events_in_grid: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub coverage: Coverage,
    pub flagged_cells: usize,
    pub hits: usize,
    pub total: usize,
    pub hit_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_hit_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HitRateReport {
    pub tool: ToolMeta,
    pub input: InputSummary,
    pub coverages: Vec<CoverageRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InverseReport {
    pub tool: ToolMeta,
    pub input: InputSummary,
    pub levels: Vec<InverseHitRate>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}
