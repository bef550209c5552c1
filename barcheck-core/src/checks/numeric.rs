//! Numeric column summaries: range, total and sign checks.

use polars::prelude::*;

/// Min, max, sum and sign information for one numeric column.
///
/// NaN and null values are excluded from every statistic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sum: f64,
    pub count: usize,
    pub negatives: usize,
}

impl NumericSummary {
    pub fn has_negatives(&self) -> bool {
        self.negatives > 0
    }

    /// `"a - b"` with two decimals, or `"n/a"` when the column has no values.
    pub fn range_label(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{min:.2} - {max:.2}"),
            _ => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    #[error("column '{column}' is not numeric ({dtype})")]
    NotNumeric { column: String, dtype: String },

    #[error("column '{column}' could not be read as numbers: {reason}")]
    Conversion { column: String, reason: String },
}

/// Summarise an integer or float column.
pub fn summarize(column: &Column) -> Result<NumericSummary, NumericError> {
    let dtype = column.dtype();
    if !(dtype.is_integer() || dtype.is_float()) {
        return Err(NumericError::NotNumeric {
            column: column.name().to_string(),
            dtype: dtype.to_string(),
        });
    }

    let conversion = |e: PolarsError| NumericError::Conversion {
        column: column.name().to_string(),
        reason: e.to_string(),
    };
    let floats = column.cast(&DataType::Float64).map_err(conversion)?;
    let values = floats.f64().map_err(conversion)?;

    let mut summary = NumericSummary::default();
    for value in values.into_iter().flatten().filter(|v| !v.is_nan()) {
        summary.count += 1;
        summary.sum += value;
        if value < 0.0 {
            summary.negatives += 1;
        }
        summary.min = Some(summary.min.map_or(value, |m| m.min(value)));
        summary.max = Some(summary.max.map_or(value, |m| m.max(value)));
    }
    Ok(summary)
}

/// Format a whole number with thousands separators.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}
