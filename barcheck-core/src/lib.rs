//! barcheck core — record-set loading, schema classification, per-file validation.
//!
//! This crate contains the validation logic itself:
//! - Loading a Parquet file into an in-memory record set (`data`)
//! - Classifying the record shape as bars, ticks or unknown (`schema`)
//! - The fixed battery of quality checks (`checks`)
//! - Per-file validation producing a `FileResult` (`validate`)
//!
//! Nothing here mutates the data it inspects. Every per-file problem becomes a
//! `Finding`; only invocation-level conditions surface as errors.

pub mod checks;
pub mod data;
pub mod finding;
pub mod result;
pub mod schema;
pub mod validate;

pub use data::{LoadError, ParquetLoader, RecordSetLoader};
pub use finding::{Check, Finding, Severity};
pub use result::FileResult;
pub use schema::{classify, Schema, SchemaRule, SCHEMA_RULES};
pub use validate::{Validator, ValidatorOptions};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the validator and its outputs can cross threads.
    ///
    /// The batch runner fans files out over a rayon pool, so these must stay
    /// `Send + Sync`.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Validator>();
        require_sync::<Validator>();
        require_send::<FileResult>();
        require_sync::<FileResult>();
        require_send::<Finding>();
        require_sync::<Finding>();
        require_send::<LoadError>();
        require_sync::<LoadError>();
    }
}
