use std::io::{BufRead, Cursor, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::error::{EvalError, Result};
use crate::input::open_maybe_gz;
use crate::model::points::TimedPoints;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy)]
struct Columns {
    time: usize,
    x: usize,
    y: usize,
}

/// Reads events from a tab or comma separated file with a header naming a
/// timestamp column (`timestamp`, `time` or `t`) and `x`/`y` columns.
/// Fields may be quoted.
pub fn load_events(path: &Path) -> Result<TimedPoints> {
    let mut reader = open_maybe_gz(path)?;
    let mut header = String::new();
    if reader.read_line(&mut header)? == 0 {
        return Err(EvalError::Parse("events file is empty".to_string()));
    }
    let delimiter = if header.contains('\t') { b'\t' } else { b',' };

    let mut records = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(Cursor::new(header.into_bytes()).chain(reader));

    let columns = parse_header(
        records
            .headers()
            .map_err(|e| EvalError::Parse(format!("events header: {e}")))?,
    )?;

    let mut timestamps = Vec::new();
    let mut xcoords = Vec::new();
    let mut ycoords = Vec::new();
    for result in records.records() {
        let record = result.map_err(|e| EvalError::Parse(e.to_string()))?;
        let line_no = record.position().map_or(0, |p| p.line());
        let field = |idx: usize| {
            record.get(idx).ok_or_else(|| {
                EvalError::Parse(format!("line {line_no}: expected at least {} fields", idx + 1))
            })
        };
        timestamps.push(parse_timestamp(field(columns.time)?).ok_or_else(|| {
            EvalError::Parse(format!("line {line_no}: invalid timestamp"))
        })?);
        xcoords.push(parse_coord(field(columns.x)?, line_no)?);
        ycoords.push(parse_coord(field(columns.y)?, line_no)?);
    }

    let points = TimedPoints::from_coords(timestamps, xcoords, ycoords)?;
    info!(path = %path.display(), events = points.len(), "loaded events");
    Ok(points)
}

fn parse_header(header: &StringRecord) -> Result<Columns> {
    let mut time = None;
    let mut x = None;
    let mut y = None;
    for (idx, name) in header.iter().enumerate() {
        match name.to_ascii_lowercase().as_str() {
            "timestamp" | "time" | "t" if time.is_none() => time = Some(idx),
            "x" if x.is_none() => x = Some(idx),
            "y" if y.is_none() => y = Some(idx),
            _ => {}
        }
    }
    match (time, x, y) {
        (Some(time), Some(x), Some(y)) => Ok(Columns { time, x, y }),
        _ => Err(EvalError::Parse(
            "events header must name timestamp, x and y columns".to_string(),
        )),
    }
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_coord(s: &str, line_no: u64) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| EvalError::Parse(format!("line {line_no}: invalid coordinate {s:?}")))
}
