//! The individual quality checks run by the validator.
//!
//! Each function here inspects a frame or column and returns plain values;
//! turning them into findings is the validator's job.

pub mod numeric;
pub mod quality;
pub mod timestamp;

pub use numeric::{summarize, NumericError, NumericSummary};
pub use quality::{duplicate_rows, null_counts, NullCount};
pub use timestamp::{format_duration, timestamp_span, EpochUnit, TimestampError, TimestampSpan};
