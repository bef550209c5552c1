//! Null and duplicate-row detection.

use polars::prelude::*;

/// Missing values found in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullCount {
    pub column: String,
    pub nulls: usize,
}

/// Columns with at least one null, in column order.
///
/// Float NaN values count as nulls: upstream writers use NaN for missing
/// prices.
pub fn null_counts(df: &DataFrame) -> Vec<NullCount> {
    df.get_columns()
        .iter()
        .map(|column| NullCount {
            column: column.name().to_string(),
            nulls: column.null_count() + nan_count(column),
        })
        .filter(|count| count.nulls > 0)
        .collect()
}

fn nan_count(column: &Column) -> usize {
    if !column.dtype().is_float() {
        return 0;
    }
    column
        .cast(&DataType::Float64)
        .ok()
        .and_then(|c| c.f64().ok().map(|ca| ca.into_iter().flatten().filter(|v| v.is_nan()).count()))
        .unwrap_or(0)
}

/// Number of rows that repeat an earlier row across every column.
///
/// The first occurrence is not counted.
pub fn duplicate_rows(df: &DataFrame) -> PolarsResult<usize> {
    if df.height() < 2 {
        return Ok(0);
    }
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(df.height() - unique.height())
}
