//! End-to-end tests of the simplify and aggregate pipeline, exercising the
//! same entry points the binaries call.

use dembench_runner::{
    run_aggregate, run_simplify, AggregateArgs, RunnerError, SimplifyArgs,
    ELAPSED_FILENAME, PROFILE_FILENAME, SIMPLE_PROFILE_FILENAME,
};
use std::path::Path;

fn write_run_outputs(dir: &Path, footprint_mb: f64, elapsed_sec: f64, fetch_sec: f64) {
    std::fs::write(
        dir.join(PROFILE_FILENAME),
        format!(
            r#"{{"max_footprint_mb": {}, "elapsed_time_sec": {}, "samples": []}}"#,
            footprint_mb, elapsed_sec
        ),
    )
    .unwrap();
    std::fs::write(
        dir.join(ELAPSED_FILENAME),
        format!(r#"{{"get_dem": {}, "do_computations": 20.0}}"#, fetch_sec),
    )
    .unwrap();
}

#[test]
fn test_simplify_writes_expected_record() {
    let dir = tempfile::tempdir().unwrap();
    write_run_outputs(dir.path(), 512.5, 30.2, 5.0);

    let args = SimplifyArgs {
        out_dir: dir.path().to_path_buf(),
    };
    let out_path = run_simplify(&args).unwrap();
    assert_eq!(out_path, dir.path().join(SIMPLE_PROFILE_FILENAME));

    let text = std::fs::read_to_string(&out_path).unwrap();
    let record: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(record["max_footprint_mb"], 512.5);
    assert_eq!(record["total_elapsed_sec"], 30.2);
    // No read_dem_as_array timing was recorded, so fetch time stands alone.
    assert_eq!(record["download_and_stitch_sec"], 5.0);
    assert_eq!(record["compute_sec"], 20.0);
}

#[test]
fn test_simplify_fails_without_inputs() {
    let dir = tempfile::tempdir().unwrap();

    let args = SimplifyArgs {
        out_dir: dir.path().to_path_buf(),
    };
    let err = run_simplify(&args).unwrap_err();
    assert!(matches!(err, RunnerError::ReadInput { .. }));

    // No partial output on failure.
    assert!(!dir.path().join(SIMPLE_PROFILE_FILENAME).exists());
}

#[test]
fn test_simplify_fails_on_missing_report_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(PROFILE_FILENAME),
        r#"{"elapsed_time_sec": 1.0}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join(ELAPSED_FILENAME), "{}").unwrap();

    let args = SimplifyArgs {
        out_dir: dir.path().to_path_buf(),
    };
    assert!(run_simplify(&args).is_err());
    assert!(!dir.path().join(SIMPLE_PROFILE_FILENAME).exists());
}

#[test]
fn test_simplify_then_aggregate_round_trip() {
    let run_a = tempfile::tempdir().unwrap();
    let run_b = tempfile::tempdir().unwrap();
    write_run_outputs(run_a.path(), 100.0, 10.0, 4.0);
    write_run_outputs(run_b.path(), 200.0, 20.0, 8.0);

    let path_a = run_simplify(&SimplifyArgs {
        out_dir: run_a.path().to_path_buf(),
    })
    .unwrap();
    let path_b = run_simplify(&SimplifyArgs {
        out_dir: run_b.path().to_path_buf(),
    })
    .unwrap();

    let json = run_aggregate(&AggregateArgs {
        profile: vec![path_a, path_b],
    })
    .unwrap();

    let mean: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(mean["max_footprint_mb"], 150.0);
    assert_eq!(mean["total_elapsed_sec"], 15.0);
    assert_eq!(mean["download_and_stitch_sec"], 6.0);
    assert_eq!(mean["compute_sec"], 20.0);
}

#[test]
fn test_aggregate_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = AggregateArgs {
        profile: vec![dir.path().join("nope.json")],
    };
    assert!(matches!(
        run_aggregate(&args),
        Err(RunnerError::ReadInput { .. })
    ));
}

#[test]
fn test_aggregate_fails_on_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let args = AggregateArgs {
        profile: vec![path],
    };
    assert!(matches!(
        run_aggregate(&args),
        Err(RunnerError::ReadInput { .. })
    ));
}
