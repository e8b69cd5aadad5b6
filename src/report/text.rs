use crate::report::{HitRateReport, InputSummary, InverseReport, format_f64_6};

pub fn render_hit_rates_text(report: &HitRateReport) -> String {
    let mut out = String::new();

    out.push_str("Hit Rate Report\n");
    out.push_str("===============\n\n");
    push_input_section(&mut out, &report.input);

    out.push_str("2. Hit rates\n");
    let with_max = report
        .coverages
        .iter()
        .any(|row| row.maximum_hit_rate.is_some());
    if with_max {
        out.push_str("coverage\tflagged_cells\thits\ttotal\thit_rate\tmaximum_hit_rate\n");
    } else {
        out.push_str("coverage\tflagged_cells\thits\ttotal\thit_rate\n");
    }
    for row in &report.coverages {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}",
            row.coverage,
            row.flagged_cells,
            row.hits,
            row.total,
            format_f64_6(row.hit_rate)
        ));
        if with_max {
            let max = row.maximum_hit_rate.map(format_f64_6).unwrap_or_default();
            out.push('\t');
            out.push_str(&max);
        }
        out.push('\n');
    }
    out
}

pub fn render_inverse_text(report: &InverseReport) -> String {
    let mut out = String::new();

    out.push_str("Inverse Hit Rate Report\n");
    out.push_str("=======================\n\n");
    push_input_section(&mut out, &report.input);

    out.push_str("2. Minimal coverage per hit rate\n");
    if report.levels.is_empty() {
        out.push_str("No event falls inside a valid cell.\n");
        return out;
    }
    out.push_str("hit_rate\tcells\tcoverage_percent\n");
    for level in &report.levels {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            format_f64_6(level.hit_rate),
            level.cells,
            format_f64_6(level.coverage_percent)
        ));
    }
    out
}

fn push_input_section(out: &mut String, input: &InputSummary) {
    out.push_str("1. Inputs\n");
    out.push_str(&format!("Prediction: {}\n", input.prediction));
    out.push_str(&format!("Events: {}\n", input.events));
    if input.window_start.is_some() || input.window_end.is_some() {
        out.push_str(&format!(
            "Window: [{}, {})\n",
            input.window_start.as_deref().unwrap_or("-"),
            input.window_end.as_deref().unwrap_or("-")
        ));
    }
    out.push_str(&format!(
        "Grid: {} x {} cells ({} valid)\n",
        input.n_rows, input.n_cols, input.n_cells_valid
    ));
    out.push_str(&format!(
        "Events evaluated: {} of {} loaded ({} inside the grid)\n\n",
        input.n_events, input.n_events_loaded, input.n_events_in_grid
    ));
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
