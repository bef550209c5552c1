//! Record-set loading

pub mod loader;

pub use loader::{LoadError, ParquetLoader, RecordSetLoader};
