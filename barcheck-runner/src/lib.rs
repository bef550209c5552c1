//! barcheck runner — batch validation, configuration and reporting.
//!
//! This crate builds on `barcheck-core` to provide:
//! - File/directory discovery and per-file isolation (`batch`)
//! - TOML configuration (`config`)
//! - Text, JSON and CSV reports (`report`)

pub mod batch;
pub mod config;
pub mod report;

pub use batch::{BatchError, BatchResult, BatchRunner, SCHEMA_VERSION};
pub use config::{ConfigError, ValidationConfig};
pub use report::{export_csv, export_json, import_json, render_file, render_text};
