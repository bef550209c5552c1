//! Per-file validation outcome.

use serde::{Deserialize, Serialize};

use crate::finding::{Check, Finding, Severity};
use crate::schema::Schema;

/// Outcome of validating one file.
///
/// `passed` is derived from the findings: a file fails exactly when at least
/// one `Error` finding is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    /// File name (or the path as given when it has no file name).
    pub file: String,
    pub schema: Schema,
    pub findings: Vec<Finding>,
    pub passed: bool,
}

impl FileResult {
    pub fn from_findings(file: impl Into<String>, schema: Schema, findings: Vec<Finding>) -> Self {
        let passed = !findings.iter().any(Finding::is_error);
        Self {
            file: file.into(),
            schema,
            findings,
            passed,
        }
    }

    /// A file that could not be loaded: one error, unknown schema, failed.
    pub fn load_failed(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_findings(
            file,
            Schema::Unknown,
            vec![Finding::error(Check::Load, message)],
        )
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Findings emitted by one check.
    pub fn findings_for(&self, check: Check) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.check == check)
    }
}
