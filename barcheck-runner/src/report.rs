//! Text, JSON and CSV renderings of a `BatchResult`.
//!
//! None of these formats is a compatibility contract; they surface the same
//! information (per-file schema and findings, aggregate counts) in different
//! shapes. JSON output carries `schema_version`.

use anyhow::{bail, Context, Result};
use barcheck_core::FileResult;

use crate::batch::{BatchResult, SCHEMA_VERSION};

const RULE_WIDTH: usize = 60;

// ─── Text ───────────────────────────────────────────────────────────

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&format!("{rule}\n{title}\n{rule}\n"));
}

/// Per-file block: header, schema, every finding, verdict.
pub fn render_file(result: &FileResult) -> String {
    let mut out = String::new();
    banner(&mut out, &format!("Testing: {}", result.file));
    out.push_str(&format!(
        "Schema: {} ({})\n",
        result.schema,
        result.schema.description()
    ));
    for finding in &result.findings {
        out.push_str(&format!("  {finding}\n"));
    }
    out.push_str(if result.passed {
        "✓ File validation PASSED\n"
    } else {
        "✗ File validation FAILED\n"
    });
    out
}

/// Full human-readable report: every file, then the summary.
pub fn render_text(batch: &BatchResult) -> String {
    let mut out = format!("Validating: {}\n", batch.target.display());
    if batch.total() > 1 {
        out.push_str(&format!("Found {} file(s)\n", batch.total()));
    }
    for note in &batch.notes {
        out.push_str(&format!("✗ {note}\n"));
    }

    for result in batch.files.values() {
        out.push('\n');
        out.push_str(&render_file(result));
    }

    out.push('\n');
    banner(&mut out, "SUMMARY");
    out.push_str(&format!("Total files: {}\n", batch.total()));
    out.push_str(&format!("Passed: {} ✓\n", batch.passed));
    out.push_str(&format!("Failed: {} ✗\n\n", batch.failed));
    out.push_str(if batch.overall {
        "All files validated successfully\n"
    } else if batch.total() == 0 {
        "No files were validated\n"
    } else {
        "⚠ Some files failed validation\n"
    });
    out
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a `BatchResult` to pretty JSON.
pub fn export_json(batch: &BatchResult) -> Result<String> {
    serde_json::to_string_pretty(batch).context("failed to serialize BatchResult to JSON")
}

/// Deserialize a `BatchResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<BatchResult> {
    let batch: BatchResult =
        serde_json::from_str(json).context("failed to deserialize BatchResult from JSON")?;
    if batch.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            batch.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(batch)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Export every finding as one CSV row.
///
/// Columns: file, schema, passed, severity, check, message
pub fn export_csv(batch: &BatchResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["file", "schema", "passed", "severity", "check", "message"])?;

    for result in batch.files.values() {
        let schema = result.schema.to_string();
        let passed = result.passed.to_string();
        for finding in &result.findings {
            let severity = finding.severity.to_string();
            let check = finding.check.to_string();
            wtr.write_record([
                result.file.as_str(),
                schema.as_str(),
                passed.as_str(),
                severity.as_str(),
                check.as_str(),
                finding.message.as_str(),
            ])?;
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcheck_core::{Check, Finding, Schema};

    fn sample() -> BatchResult {
        BatchResult::from_results(
            "/data/out",
            vec![
                FileResult::from_findings(
                    "20241021.parquet",
                    Schema::Bar,
                    vec![
                        Finding::info(Check::Schema, "minute bar data (OHLC) detected"),
                        Finding::warning(Check::Duplicates, "2 duplicate rows"),
                    ],
                ),
                FileResult::load_failed("broken.parquet", "failed to read broken.parquet: bad"),
            ],
        )
    }

    #[test]
    fn text_report_has_files_and_summary() {
        let text = render_text(&sample());
        assert!(text.contains("Testing: 20241021.parquet"));
        assert!(text.contains("  ⚠ 2 duplicate rows"));
        assert!(text.contains("✓ File validation PASSED"));
        assert!(text.contains("Testing: broken.parquet"));
        assert!(text.contains("✗ File validation FAILED"));
        assert!(text.contains("Total files: 2"));
        assert!(text.contains("Passed: 1 ✓"));
        assert!(text.contains("Failed: 1 ✗"));
        assert!(text.contains("⚠ Some files failed validation"));
    }

    #[test]
    fn file_block_layout() {
        let result = FileResult::from_findings(
            "a.parquet",
            Schema::Tick,
            vec![Finding::info(Check::Nulls, "no null values")],
        );
        let rule = "=".repeat(RULE_WIDTH);
        let expected = format!(
            "{rule}\nTesting: a.parquet\n{rule}\nSchema: tick (tick data)\n  ✓ no null values\n✓ File validation PASSED\n"
        );
        assert_eq!(render_file(&result), expected);
    }

    #[test]
    fn text_report_shows_notes_for_empty_runs() {
        let batch = BatchResult::empty("/data/empty", "no .parquet files found in /data/empty");
        let text = render_text(&batch);
        assert!(text.contains("✗ no .parquet files found in /data/empty"));
        assert!(text.contains("No files were validated"));
    }

    #[test]
    fn json_round_trip_keeps_counts() {
        let batch = sample();
        let json = export_json(&batch).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        assert!(json.contains("\"severity\": \"warning\""));

        let back = import_json(&json).unwrap();
        assert_eq!(back, batch);
    }

    #[test]
    fn json_rejects_future_versions() {
        let mut batch = sample();
        batch.schema_version = SCHEMA_VERSION + 1;
        let json = serde_json::to_string(&batch).unwrap();
        assert!(import_json(&json).is_err());
    }

    #[test]
    fn csv_has_one_row_per_finding() {
        let csv = export_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "file,schema,passed,severity,check,message");
        assert_eq!(lines.len(), 1 + 3);
        assert!(lines[2].starts_with("20241021.parquet,bar,true,warning,duplicates,"));
        assert!(lines[3].starts_with("broken.parquet,unknown,false,error,load,"));
    }
}
