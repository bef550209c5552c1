//! Integration tests for directory and single-file batch runs.

use barcheck_core::{Schema, Validator};
use barcheck_runner::{render_text, BatchError, BatchRunner, ValidationConfig};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

const T0: i64 = 1_729_503_000_000;

fn write_parquet(dir: &Path, name: &str, mut df: DataFrame) -> PathBuf {
    let path = dir.join(name);
    ParquetWriter::new(File::create(&path).unwrap())
        .finish(&mut df)
        .unwrap();
    path
}

fn timestamps(n: usize) -> Column {
    let ts: Vec<i64> = (0..n as i64).map(|i| T0 + i * 60_000).collect();
    Column::new("timestamp".into(), ts)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap()
}

fn bars(volumes: &[i64]) -> DataFrame {
    let n = volumes.len();
    DataFrame::new(vec![
        timestamps(n),
        Column::new("open".into(), vec![10.0; n]),
        Column::new("high".into(), vec![12.0; n]),
        Column::new("low".into(), vec![9.0; n]),
        Column::new("close".into(), vec![11.0; n]),
        Column::new("volume".into(), volumes),
    ])
    .unwrap()
}

fn ticks() -> DataFrame {
    DataFrame::new(vec![
        timestamps(3),
        Column::new("price".into(), &[100.0, 100.25, 100.5]),
        Column::new("volume".into(), &[1i64, 2, 3]),
    ])
    .unwrap()
}

fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"not parquet").unwrap();
    path
}

#[test]
fn directory_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_corrupt(dir.path(), "a_corrupt.parquet");
    let good = write_parquet(dir.path(), "b_good.parquet", bars(&[100, 200]));
    write_parquet(dir.path(), "c_ticks.parquet", ticks());
    std::fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();

    let batch = BatchRunner::new().run(dir.path()).unwrap();

    assert_eq!(batch.total(), 3);
    assert_eq!(batch.passed, 2);
    assert_eq!(batch.failed, 1);
    assert!(!batch.overall);

    let names: Vec<&str> = batch.files.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["a_corrupt.parquet", "b_good.parquet", "c_ticks.parquet"]);

    assert!(!batch.files["a_corrupt.parquet"].passed);
    assert_eq!(batch.files["c_ticks.parquet"].schema, Schema::Tick);

    // The good file's entry is exactly what validating it alone produces.
    let alone = Validator::new().validate(&good);
    assert_eq!(batch.files["b_good.parquet"], alone);
}

#[test]
fn single_file_target_wraps_one_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_parquet(dir.path(), "20241021.parquet", bars(&[5, -5]));

    let batch = BatchRunner::new().run(&path).unwrap();

    assert_eq!(batch.total(), 1);
    let only = &batch.files["20241021.parquet"];
    assert!(!only.passed);
    assert_eq!(batch.overall, only.passed);
    assert_eq!(batch.failed, 1);
}

#[test]
fn single_file_ignores_extension_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_parquet(dir.path(), "export.bin", bars(&[1]));

    let batch = BatchRunner::new().run(&path).unwrap();
    assert!(batch.overall);
}

#[test]
fn empty_directory_is_unsuccessful() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.csv"), b"a,b").unwrap();

    let batch = BatchRunner::new().run(dir.path()).unwrap();

    assert!(batch.files.is_empty());
    assert!(!batch.overall);
    assert_eq!(batch.notes.len(), 1);
    assert!(batch.notes[0].starts_with("no .parquet files found"));
    assert!(render_text(&batch).contains("Total files: 0"));
}

#[test]
fn nonexistent_target_is_path_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere");

    let err = BatchRunner::new().run(&missing).unwrap_err();
    assert!(matches!(err, BatchError::PathNotFound(ref p) if p == &missing));
}

#[test]
fn parallel_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..6 {
        write_parquet(dir.path(), &format!("bars_{i}.parquet"), bars(&[i, i + 1]));
    }
    write_parquet(dir.path(), "bars_neg.parquet", bars(&[-1]));
    write_corrupt(dir.path(), "bars_zz.parquet");

    let sequential = BatchRunner::new().run(dir.path()).unwrap();
    let parallel = BatchRunner::new()
        .with_parallelism(true)
        .run(dir.path())
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.passed, 6);
    assert_eq!(parallel.failed, 2);
}

#[test]
fn config_drives_runner() {
    let dir = tempfile::tempdir().unwrap();
    let partial = DataFrame::new(vec![
        timestamps(1),
        Column::new("open".into(), &[1.0]),
        Column::new("high".into(), &[1.0]),
    ])
    .unwrap();
    write_parquet(dir.path(), "partial.pq", partial);

    let config = ValidationConfig::from_toml(
        r#"
extension = "pq"
strict_columns = true
"#,
    )
    .unwrap();
    let batch = BatchRunner::from_config(&config).run(dir.path()).unwrap();

    assert_eq!(batch.total(), 1);
    assert!(!batch.overall);
    assert_eq!(batch.files["partial.pq"].errors().count(), 3);
}
