//! Turns a timestamp column into a min/max span.
//!
//! Accepted column types:
//! - `Datetime` in any time unit (time zone ignored, values read as UTC)
//! - `Date` (midnight)
//! - integers, read as Unix epoch offsets in a configurable unit
//! - strings in RFC 3339 or a handful of ISO-like layouts
//!
//! Floats are truncated and read like integers. Nulls are skipped; a column
//! with no values at all has no span. Anything else is an error for the caller
//! to report.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit of integer epoch timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpochUnit {
    S,
    Ms,
    Us,
    #[default]
    Ns,
}

impl EpochUnit {
    fn to_datetime(self, value: i64) -> Option<NaiveDateTime> {
        let dt = match self {
            EpochUnit::S => DateTime::from_timestamp(value, 0),
            EpochUnit::Ms => DateTime::from_timestamp_millis(value),
            EpochUnit::Us => DateTime::from_timestamp_micros(value),
            EpochUnit::Ns => Some(DateTime::from_timestamp_nanos(value)),
        };
        dt.map(|d| d.naive_utc())
    }
}

impl From<TimeUnit> for EpochUnit {
    fn from(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Milliseconds => EpochUnit::Ms,
            TimeUnit::Microseconds => EpochUnit::Us,
            TimeUnit::Nanoseconds => EpochUnit::Ns,
        }
    }
}

/// Earliest and latest instant in a timestamp column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampSpan {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
    /// Number of non-null timestamps.
    pub count: usize,
}

impl TimestampSpan {
    pub fn duration(&self) -> TimeDelta {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimestampError {
    #[error("timestamp column has unsupported type {0}")]
    UnsupportedType(String),

    #[error("unparseable timestamp '{value}' at row {row}")]
    Unparseable { row: usize, value: String },

    #[error("timestamp value {value} out of range")]
    OutOfRange { value: i64 },

    #[error("timestamp conversion failed: {0}")]
    Conversion(String),
}

fn conversion(e: PolarsError) -> TimestampError {
    TimestampError::Conversion(e.to_string())
}

/// Parse `column` and return its span, or `None` when it holds no values.
///
/// `integer_unit` applies to integer and float columns; `Datetime` columns
/// carry their own unit.
pub fn timestamp_span(
    column: &Column,
    integer_unit: EpochUnit,
) -> Result<Option<TimestampSpan>, TimestampError> {
    match column.dtype() {
        DataType::Datetime(unit, _) => epoch_span(column, EpochUnit::from(*unit)),
        DataType::Date => date_span(column),
        DataType::String => string_span(column),
        dtype if dtype.is_integer() || dtype.is_float() => epoch_span(column, integer_unit),
        other => Err(TimestampError::UnsupportedType(other.to_string())),
    }
}

fn epoch_span(column: &Column, unit: EpochUnit) -> Result<Option<TimestampSpan>, TimestampError> {
    let physical = column.cast(&DataType::Int64).map_err(conversion)?;
    let values = physical.i64().map_err(conversion)?;

    let count = values.len() - values.null_count();
    let (Some(min), Some(max)) = (values.min(), values.max()) else {
        return Ok(None);
    };

    let to_dt = |value: i64| {
        unit.to_datetime(value)
            .ok_or(TimestampError::OutOfRange { value })
    };

    Ok(Some(TimestampSpan {
        min: to_dt(min)?,
        max: to_dt(max)?,
        count,
    }))
}

fn date_span(column: &Column) -> Result<Option<TimestampSpan>, TimestampError> {
    let physical = column.cast(&DataType::Int32).map_err(conversion)?;
    let days = physical.i32().map_err(conversion)?;

    let count = days.len() - days.null_count();
    let (Some(min), Some(max)) = (days.min(), days.max()) else {
        return Ok(None);
    };

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(TimestampError::OutOfRange { value: 0 })?;
    let to_dt = |value: i32| {
        epoch
            .checked_add_signed(TimeDelta::days(value as i64))
            .ok_or(TimestampError::OutOfRange {
                value: value as i64,
            })
    };

    Ok(Some(TimestampSpan {
        min: to_dt(min)?,
        max: to_dt(max)?,
        count,
    }))
}

fn string_span(column: &Column) -> Result<Option<TimestampSpan>, TimestampError> {
    let strings = column.str().map_err(conversion)?;

    let mut span: Option<(NaiveDateTime, NaiveDateTime)> = None;
    let mut count = 0usize;
    for (row, value) in strings.into_iter().enumerate() {
        let Some(raw) = value else { continue };
        let parsed = parse_timestamp(raw).ok_or_else(|| TimestampError::Unparseable {
            row,
            value: raw.to_string(),
        })?;
        count += 1;
        span = Some(match span {
            None => (parsed, parsed),
            Some((lo, hi)) => (lo.min(parsed), hi.max(parsed)),
        });
    }

    Ok(span.map(|(min, max)| TimestampSpan { min, max, count }))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y%m%d %H%M%S",
];

/// Parse a single textual timestamp.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render a duration as `{days} days HH:MM:SS`.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}")
}
