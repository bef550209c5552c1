//! Record-shape classification.
//!
//! Two shapes are recognised:
//! - Bar: `timestamp, open, high, low, close, volume` (minute OHLC bars)
//! - Tick: `timestamp, price, volume` with optional `bid, ask`
//!
//! Classification only looks at the signature columns of each rule. Rules are
//! evaluated in table order, so a column set carrying both signatures is a Bar.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TIMESTAMP: &str = "timestamp";
pub const OPEN: &str = "open";
pub const HIGH: &str = "high";
pub const LOW: &str = "low";
pub const CLOSE: &str = "close";
pub const VOLUME: &str = "volume";
pub const PRICE: &str = "price";
pub const BID: &str = "bid";
pub const ASK: &str = "ask";

/// The shape of a loaded record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Bar,
    Tick,
    Unknown,
}

impl Schema {
    pub fn is_known(self) -> bool {
        self != Schema::Unknown
    }

    /// Human-readable description for reports.
    pub fn description(self) -> &'static str {
        match self {
            Schema::Bar => "minute bar data (OHLC)",
            Schema::Tick => "tick data",
            Schema::Unknown => "unknown data format",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Schema::Bar => "bar",
            Schema::Tick => "tick",
            Schema::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One entry of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRule {
    pub schema: Schema,
    /// Columns whose presence selects this rule.
    pub signature: &'static [&'static str],
    /// Columns a well-formed file of this shape carries.
    pub expected: &'static [&'static str],
    /// Columns summarised only when present.
    pub optional: &'static [&'static str],
}

/// Classification rules in priority order.
pub const SCHEMA_RULES: &[SchemaRule] = &[
    SchemaRule {
        schema: Schema::Bar,
        signature: &[TIMESTAMP, OPEN, HIGH],
        expected: &[TIMESTAMP, OPEN, HIGH, LOW, CLOSE, VOLUME],
        optional: &[],
    },
    SchemaRule {
        schema: Schema::Tick,
        signature: &[TIMESTAMP, PRICE],
        expected: &[TIMESTAMP, PRICE, VOLUME],
        optional: &[BID, ASK],
    },
];

fn contains<S: AsRef<str>>(columns: &[S], name: &str) -> bool {
    columns.iter().any(|c| c.as_ref() == name)
}

impl SchemaRule {
    /// True if every signature column is present.
    pub fn matches<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.signature.iter().all(|name| contains(columns, name))
    }

    /// Expected columns absent from `columns`, in table order.
    pub fn missing_expected<S: AsRef<str>>(&self, columns: &[S]) -> Vec<&'static str> {
        self.expected
            .iter()
            .copied()
            .filter(|name| !contains(columns, name))
            .collect()
    }

    /// Optional columns that are present, in table order.
    pub fn present_optional<S: AsRef<str>>(&self, columns: &[S]) -> Vec<&'static str> {
        self.optional
            .iter()
            .copied()
            .filter(|name| contains(columns, name))
            .collect()
    }
}

/// First rule whose signature matches, if any.
pub fn matching_rule<S: AsRef<str>>(columns: &[S]) -> Option<&'static SchemaRule> {
    SCHEMA_RULES.iter().find(|rule| rule.matches(columns))
}

/// Classify a column set as Bar, Tick or Unknown.
pub fn classify<S: AsRef<str>>(columns: &[S]) -> Schema {
    matching_rule(columns)
        .map(|rule| rule.schema)
        .unwrap_or(Schema::Unknown)
}
