//! Tagged diagnostics emitted while validating one file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is. Only `Error` fails a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Single-character marker used by the text report.
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Info => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// The validation step that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Load,
    Columns,
    Timestamp,
    Schema,
    Nulls,
    Duplicates,
    Volume,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Check::Load => "load",
            Check::Columns => "columns",
            Check::Timestamp => "timestamp",
            Check::Schema => "schema",
            Check::Nulls => "nulls",
            Check::Duplicates => "duplicates",
            Check::Volume => "volume",
        };
        f.write_str(s)
    }
}

/// One diagnostic. Findings accumulate in order and never touch the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub check: Check,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, check: Check, message: impl Into<String>) -> Self {
        Self {
            severity,
            check,
            message: message.into(),
        }
    }

    pub fn info(check: Check, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, check, message)
    }

    pub fn warning(check: Check, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, check, message)
    }

    pub fn error(check: Check, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, check, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_seriousness() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn constructors_set_severity() {
        assert!(Finding::error(Check::Volume, "x").is_error());
        assert!(Finding::warning(Check::Nulls, "x").is_warning());
        assert!(!Finding::info(Check::Load, "x").is_error());
    }

    #[test]
    fn display_prefixes_marker() {
        let f = Finding::warning(Check::Duplicates, "2 duplicate rows");
        assert_eq!(f.to_string(), "⚠ 2 duplicate rows");
    }

    #[test]
    fn severity_and_check_display_lowercase() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Check::Duplicates.to_string(), "duplicates");
    }
}
