use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use tracing::info;

use crate::error::Result;
use crate::model::hit_rate::InverseHitRate;
use crate::pipeline::stage1_load::Stage1Output;
use crate::pipeline::stage2_evaluate::{Stage2Output, count_in_grid};
use crate::report::json::{render_hit_rates_json, render_inverse_json};
use crate::report::text::{render_hit_rates_text, render_inverse_text};
use crate::report::{HitRateReport, InputSummary, InverseReport, ToolMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage3Context<'a> {
    pub prediction_path: &'a Path,
    pub events_path: &'a Path,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub format: ReportFormat,
    pub out: Option<&'a Path>,
}

pub fn write_hit_rate_report(
    ctx: &Stage3Context<'_>,
    stage1: &Stage1Output,
    stage2: &Stage2Output,
) -> Result<()> {
    let report = HitRateReport {
        tool: ToolMeta::current(),
        input: summarize_inputs(ctx, stage1),
        coverages: stage2.rows.clone(),
    };
    let rendered = match ctx.format {
        ReportFormat::Text => render_hit_rates_text(&report),
        ReportFormat::Json => render_hit_rates_json(&report)?,
    };
    emit(&rendered, ctx.out)
}

pub fn write_inverse_report(
    ctx: &Stage3Context<'_>,
    stage1: &Stage1Output,
    levels: &[InverseHitRate],
) -> Result<()> {
    let report = InverseReport {
        tool: ToolMeta::current(),
        input: summarize_inputs(ctx, stage1),
        levels: levels.to_vec(),
    };
    let rendered = match ctx.format {
        ReportFormat::Text => render_inverse_text(&report),
        ReportFormat::Json => render_inverse_json(&report)?,
    };
    emit(&rendered, ctx.out)
}

pub fn summarize_inputs(ctx: &Stage3Context<'_>, stage1: &Stage1Output) -> InputSummary {
    let prediction = &stage1.prediction;
    InputSummary {
        prediction: ctx.prediction_path.display().to_string(),
        events: ctx.events_path.display().to_string(),
        window_start: ctx.start.map(|t| t.to_string()),
        window_end: ctx.end.map(|t| t.to_string()),
        n_rows: prediction.yextent(),
        n_cols: prediction.xextent(),
        n_cells_valid: prediction.intensity().valid_count(),
        n_events_loaded: stage1.n_events_loaded,
        n_events: stage1.points.len(),
        n_events_in_grid: count_in_grid(prediction, &stage1.points),
    }
}

fn emit(rendered: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(rendered.as_bytes())?;
            lock.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
