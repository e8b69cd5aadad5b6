use super::*;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("hotspot_eval_stage1_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, 1, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let prediction = dir.join("prediction.json");
    std::fs::write(
        &prediction,
        r#"{"xsize": 10, "ysize": 20, "xoffset": 2, "yoffset": 3, "intensity": [[1, 2, 3, 4], [5, 6, 7, 8]]}"#,
    )
    .unwrap();
    let events = dir.join("events.csv");
    std::fs::write(
        &events,
        "timestamp,x,y\n2017-01-01,7,13\n2017-01-02,17,13\n2017-01-03,27,13\n",
    )
    .unwrap();
    (prediction, events)
}

#[test]
fn test_run_stage1_without_window() {
    let dir = make_temp_dir();
    let (prediction, events) = write_inputs(&dir);
    let out = run_stage1(&Stage1Params {
        prediction_path: &prediction,
        events_path: &events,
        start: None,
        end: None,
    })
    .unwrap();
    assert_eq!(out.n_events_loaded, 3);
    assert_eq!(out.points.len(), 3);
    assert_eq!(out.prediction.xextent(), 4);
}

#[test]
fn test_run_stage1_with_window() {
    let dir = make_temp_dir();
    let (prediction, events) = write_inputs(&dir);
    let out = run_stage1(&Stage1Params {
        prediction_path: &prediction,
        events_path: &events,
        start: Some(day(2)),
        end: Some(day(3)),
    })
    .unwrap();
    assert_eq!(out.n_events_loaded, 3);
    assert_eq!(out.points.len(), 1);
    assert_eq!(out.points.xcoords(), &[17.0]);
}

#[test]
fn test_run_stage1_rejects_empty_window() {
    let dir = make_temp_dir();
    let (prediction, events) = write_inputs(&dir);
    let err = run_stage1(&Stage1Params {
        prediction_path: &prediction,
        events_path: &events,
        start: Some(day(3)),
        end: Some(day(3)),
    })
    .unwrap_err();
    assert!(matches!(err, EvalError::InvalidArgument(_)));
}

#[test]
fn test_restrict_window_passthrough() {
    let points =
        TimedPoints::from_coords(vec![day(1), day(5)], vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
    assert_eq!(restrict_window(points.clone(), None, None), points);
    assert_eq!(restrict_window(points, Some(day(2)), None).len(), 1);
}
