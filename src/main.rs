use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};

use hotspot_eval::error::{EvalError, Result};
use hotspot_eval::input::events::parse_timestamp;
use hotspot_eval::logging;
use hotspot_eval::model::coverage::{Coverage, CoverageProfile, parse_coverages};
use hotspot_eval::pipeline::stage1_load::{Stage1Params, run_stage1};
use hotspot_eval::pipeline::stage2_evaluate::{Stage2Inputs, run_stage2, run_stage2_inverse};
use hotspot_eval::pipeline::stage3_report::{
    ReportFormat, Stage3Context, write_hit_rate_report, write_inverse_report,
};

#[derive(Debug, Parser)]
#[command(name = "hotspot-eval", version, about = "Score grid predictions against observed events")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hit rate of the prediction at each coverage level.
    HitRates(HitRatesArgs),
    /// Smallest coverage reaching each achievable hit rate.
    Inverse(CommonArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Grid prediction JSON (optionally gzipped).
    #[arg(long)]
    prediction: PathBuf,

    /// Delimited events file with timestamp, x and y columns.
    #[arg(long)]
    events: PathBuf,

    /// Keep events at or after this time.
    #[arg(long, value_parser = parse_time_arg)]
    start: Option<NaiveDateTime>,

    /// Keep events strictly before this time.
    #[arg(long, value_parser = parse_time_arg)]
    end: Option<NaiveDateTime>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct HitRatesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Comma separated coverage percentages, e.g. `1,5,10`.
    #[arg(long)]
    coverage: Option<String>,

    /// Also report the best hit rate reachable on this grid.
    #[arg(long)]
    maximum: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::HitRates(args) => {
            let coverages = resolve_coverages(args.coverage.as_deref())?;
            let common = &args.common;
            let stage1 = run_stage1(&stage1_params(common))?;
            let stage2 = run_stage2(&Stage2Inputs {
                prediction: &stage1.prediction,
                points: &stage1.points,
                coverages: &coverages,
                include_maximum: args.maximum,
            })?;
            write_hit_rate_report(&stage3_context(common), &stage1, &stage2)
        }
        Command::Inverse(common) => {
            let stage1 = run_stage1(&stage1_params(&common))?;
            let levels = run_stage2_inverse(&stage1.prediction, &stage1.points)?;
            write_inverse_report(&stage3_context(&common), &stage1, &levels)
        }
    }
}

fn resolve_coverages(arg: Option<&str>) -> Result<Vec<Coverage>> {
    match arg {
        Some(list) => {
            let coverages = parse_coverages(list)?;
            if coverages.is_empty() {
                return Err(EvalError::InvalidArgument(
                    "--coverage lists no values".to_string(),
                ));
            }
            Ok(coverages)
        }
        None => Ok(CoverageProfile::default_v1().coverages),
    }
}

fn stage1_params(args: &CommonArgs) -> Stage1Params<'_> {
    Stage1Params {
        prediction_path: &args.prediction,
        events_path: &args.events,
        start: args.start,
        end: args.end,
    }
}

fn stage3_context(args: &CommonArgs) -> Stage3Context<'_> {
    Stage3Context {
        prediction_path: &args.prediction,
        events_path: &args.events,
        start: args.start,
        end: args.end,
        format: args.format,
        out: args.out.as_deref(),
    }
}

fn parse_time_arg(s: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_timestamp(s).ok_or_else(|| format!("invalid timestamp: {s}"))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
