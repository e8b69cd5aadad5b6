use super::*;
use chrono::NaiveDate;

fn prediction() -> GridPrediction {
    GridPrediction::from_rows(
        10.0,
        20.0,
        &[vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]],
        2.0,
        3.0,
    )
    .unwrap()
}

fn points(x: Vec<f64>, y: Vec<f64>) -> TimedPoints {
    let t = NaiveDate::from_ymd_opt(2017, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    TimedPoints::from_coords(vec![t; x.len()], x, y).unwrap()
}

#[test]
fn test_run_stage2_rows() {
    let p = prediction();
    let tp = points(vec![37.0, 7.0, 500.0, 27.0], vec![33.0, 13.0, 13.0, 33.0]);
    let coverages = [Coverage::from(50), Coverage::from(25), Coverage::from(50)];
    let out = run_stage2(&Stage2Inputs {
        prediction: &p,
        points: &tp,
        coverages: &coverages,
        include_maximum: true,
    })
    .unwrap();

    assert_eq!(out.n_events, 4);
    assert_eq!(out.n_events_in_grid, 3);
    assert_eq!(out.n_cells_valid, 8);
    assert_eq!(out.rows.len(), 2);

    let quarter = &out.rows[0];
    assert_eq!(quarter.coverage, Coverage::from(25));
    assert_eq!(quarter.flagged_cells, 2);
    assert_eq!(quarter.hits, 2);
    assert_eq!(quarter.total, 4);
    assert!((quarter.hit_rate - 0.5).abs() < 1e-12);
    assert_eq!(quarter.maximum_hit_rate, Some(0.5));

    let half = &out.rows[1];
    assert_eq!(half.flagged_cells, 4);
    assert!((half.hit_rate - 0.5).abs() < 1e-12);
    assert_eq!(half.maximum_hit_rate, Some(0.75));
}

#[test]
fn test_run_stage2_without_maximum() {
    let p = prediction();
    let tp = points(vec![7.0], vec![13.0]);
    let coverages = [Coverage::from(100)];
    let out = run_stage2(&Stage2Inputs {
        prediction: &p,
        points: &tp,
        coverages: &coverages,
        include_maximum: false,
    })
    .unwrap();
    assert_eq!(out.rows[0].maximum_hit_rate, None);
    assert_eq!(out.rows[0].hit_rate, 1.0);
}

#[test]
fn test_run_stage2_empty_events() {
    let p = prediction();
    let tp = TimedPoints::default();
    let err = run_stage2(&Stage2Inputs {
        prediction: &p,
        points: &tp,
        coverages: &[],
        include_maximum: false,
    })
    .unwrap_err();
    assert!(matches!(err, EvalError::Domain(_)));
}

#[test]
fn test_run_stage2_inverse() {
    let p = prediction();
    let tp = points(vec![37.0, 500.0], vec![33.0, 13.0]);
    let levels = run_stage2_inverse(&p, &tp).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].cells, 1);
    assert!((levels[0].hit_rate - 0.5).abs() < 1e-12);
}
