//! Per-file validation: the fixed battery of checks over one record set.
//!
//! Order of checks:
//! 1. Load (a failure short-circuits everything else)
//! 2. `timestamp` column present
//! 3. Timestamp parse and span
//! 4. Schema classification and range summaries
//! 5. Nulls per column
//! 6. Fully duplicated rows
//! 7. Non-negative volume
//!
//! Steps 2–7 all run regardless of earlier findings. Nothing escapes as an
//! error: every problem becomes a `Finding` on the returned `FileResult`.

use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

use crate::checks::numeric::group_thousands;
use crate::checks::{
    duplicate_rows, format_duration, null_counts, summarize, timestamp_span, EpochUnit,
    NumericSummary,
};
use crate::data::{ParquetLoader, RecordSetLoader};
use crate::finding::{Check, Finding, Severity};
use crate::result::FileResult;
use crate::schema::{
    matching_rule, Schema, SchemaRule, CLOSE, HIGH, LOW, OPEN, PRICE, TIMESTAMP, VOLUME,
};

/// Knobs that change how individual checks behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Unit for integer timestamp columns.
    pub integer_timestamp_unit: EpochUnit,
    /// Treat missing expected columns (e.g. a bar file without `low`) as errors.
    pub strict_columns: bool,
}

/// Validates files loaded through `L`.
#[derive(Debug, Clone)]
pub struct Validator<L = ParquetLoader> {
    loader: L,
    options: ValidatorOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::with_loader(ParquetLoader)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: RecordSetLoader> Validator<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            options: ValidatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Load and validate one file.
    pub fn validate(&self, path: &Path) -> FileResult {
        let file = file_label(path);
        debug!(file = %file, "validating");

        match self.loader.load(path) {
            Ok(df) => self.validate_frame(file, &df),
            Err(e) => {
                warn!(file = %file, error = %e, "load failed");
                FileResult::load_failed(file, e.to_string())
            }
        }
    }

    /// Validate an already-loaded record set.
    pub fn validate_frame(&self, file: impl Into<String>, df: &DataFrame) -> FileResult {
        let columns: Vec<String> = df
            .get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let mut findings = vec![Finding::info(
            Check::Load,
            format!(
                "loaded {} records, {} columns [{}], {:.2} MB",
                group_thousands(df.height() as f64),
                columns.len(),
                columns.join(", "),
                df.estimated_size() as f64 / (1024.0 * 1024.0)
            ),
        )];

        self.check_timestamp(df, &mut findings);
        let schema = self.check_schema(df, &columns, &mut findings);
        check_nulls(df, &mut findings);
        check_duplicates(df, &mut findings);
        check_volume(df, &mut findings);

        let result = FileResult::from_findings(file, schema, findings);
        debug!(
            file = %result.file,
            schema = %result.schema,
            passed = result.passed,
            "validated"
        );
        result
    }

    fn check_timestamp(&self, df: &DataFrame, findings: &mut Vec<Finding>) {
        let Ok(column) = df.column(TIMESTAMP) else {
            findings.push(Finding::error(Check::Columns, "missing timestamp column"));
            return;
        };
        findings.push(Finding::info(Check::Columns, "timestamp column present"));

        match timestamp_span(column, self.options.integer_timestamp_unit) {
            Ok(None) => findings.push(Finding::info(
                Check::Timestamp,
                "date range n/a (no timestamp values)",
            )),
            Ok(Some(span)) => findings.push(Finding::info(
                Check::Timestamp,
                format!(
                    "date range {} to {} (duration {})",
                    span.min,
                    span.max,
                    format_duration(span.duration())
                ),
            )),
            Err(e) => findings.push(Finding::error(Check::Timestamp, e.to_string())),
        }
    }

    fn check_schema(
        &self,
        df: &DataFrame,
        columns: &[String],
        findings: &mut Vec<Finding>,
    ) -> Schema {
        let Some(rule) = matching_rule(columns) else {
            findings.push(Finding::error(
                Check::Schema,
                "unrecognized schema: expected bar (timestamp, open, high) or tick (timestamp, price) columns",
            ));
            return Schema::Unknown;
        };

        findings.push(Finding::info(
            Check::Schema,
            format!("{} detected", rule.schema.description()),
        ));

        let severity = if self.options.strict_columns {
            Severity::Error
        } else {
            Severity::Warning
        };
        for name in rule.missing_expected(columns) {
            findings.push(Finding::new(
                severity,
                Check::Columns,
                format!("{} missing expected column '{name}'", rule.schema),
            ));
        }

        match rule.schema {
            Schema::Bar => bar_summary(df, findings),
            Schema::Tick => tick_summary(df, rule, columns, findings),
            Schema::Unknown => {}
        }
        rule.schema
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Push an info line built from `name`'s summary, if the column exists.
///
/// Non-numeric columns are reported as warnings; they do not fail the file.
fn summary_line(
    df: &DataFrame,
    name: &str,
    findings: &mut Vec<Finding>,
    line: impl FnOnce(&NumericSummary) -> String,
) {
    let Ok(column) = df.column(name) else { return };
    match summarize(column) {
        Ok(summary) => findings.push(Finding::info(Check::Schema, line(&summary))),
        Err(e) => findings.push(Finding::warning(Check::Schema, e.to_string())),
    }
}

/// Total volume line. Unreadable volume columns are left to the volume check.
fn volume_line(df: &DataFrame, findings: &mut Vec<Finding>) {
    let Ok(column) = df.column(VOLUME) else { return };
    if let Ok(summary) = summarize(column) {
        findings.push(Finding::info(
            Check::Schema,
            format!("total volume {}", group_thousands(summary.sum)),
        ));
    }
}

fn bar_summary(df: &DataFrame, findings: &mut Vec<Finding>) {
    summary_line(df, OPEN, findings, |s| format!("open range {}", s.range_label()));
    summary_line(df, HIGH, findings, |s| format!("high max {}", fmt_opt(s.max)));
    summary_line(df, LOW, findings, |s| format!("low min {}", fmt_opt(s.min)));
    summary_line(df, CLOSE, findings, |s| format!("close range {}", s.range_label()));
    volume_line(df, findings);
}

fn tick_summary(
    df: &DataFrame,
    rule: &SchemaRule,
    columns: &[String],
    findings: &mut Vec<Finding>,
) {
    summary_line(df, PRICE, findings, |s| format!("price range {}", s.range_label()));
    for name in rule.present_optional(columns) {
        summary_line(df, name, findings, |s| format!("{name} range {}", s.range_label()));
    }
    volume_line(df, findings);
}

fn check_nulls(df: &DataFrame, findings: &mut Vec<Finding>) {
    let counts = null_counts(df);
    if counts.is_empty() {
        findings.push(Finding::info(Check::Nulls, "no null values"));
        return;
    }
    for count in counts {
        findings.push(Finding::warning(
            Check::Nulls,
            format!("column '{}' has {} null values", count.column, count.nulls),
        ));
    }
}

fn check_duplicates(df: &DataFrame, findings: &mut Vec<Finding>) {
    match duplicate_rows(df) {
        Ok(0) => findings.push(Finding::info(Check::Duplicates, "no duplicate rows")),
        Ok(n) => findings.push(Finding::warning(
            Check::Duplicates,
            format!("{n} duplicate rows"),
        )),
        Err(e) => findings.push(Finding::warning(
            Check::Duplicates,
            format!("duplicate check could not run: {e}"),
        )),
    }
}

fn check_volume(df: &DataFrame, findings: &mut Vec<Finding>) {
    let Ok(column) = df.column(VOLUME) else { return };
    match summarize(column) {
        Ok(summary) if summary.has_negatives() => findings.push(Finding::error(
            Check::Volume,
            format!("negative volume detected ({} rows)", summary.negatives),
        )),
        Ok(_) => findings.push(Finding::info(Check::Volume, "all volumes are non-negative")),
        Err(e) => findings.push(Finding::error(Check::Volume, e.to_string())),
    }
}
