//! Batch validation over a single file or a directory of files.
//!
//! Discovery is non-recursive and sorted by file name. Every file is validated
//! independently: a file that fails to load only fails its own entry. Only
//! invocation-level problems (the target is missing or not a file/directory,
//! the directory cannot be listed) come back as `BatchError`.

use barcheck_core::{FileResult, ParquetLoader, RecordSetLoader, Validator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ValidationConfig;

/// Version of the serialized `BatchResult` layout.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("invalid path (not a file or directory): {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Aggregate outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub schema_version: u32,
    pub target: PathBuf,
    /// Per-file results keyed by file name.
    pub files: BTreeMap<String, FileResult>,
    pub passed: usize,
    pub failed: usize,
    /// True when at least one file was checked and none failed.
    pub overall: bool,
    /// Invocation-level diagnostics (e.g. nothing discovered).
    pub notes: Vec<String>,
}

impl BatchResult {
    pub fn from_results(target: impl Into<PathBuf>, results: Vec<FileResult>) -> Self {
        let files: BTreeMap<String, FileResult> = results
            .into_iter()
            .map(|result| (result.file.clone(), result))
            .collect();
        let passed = files.values().filter(|r| r.passed).count();
        let failed = files.len() - passed;
        Self {
            schema_version: SCHEMA_VERSION,
            target: target.into(),
            overall: failed == 0 && !files.is_empty(),
            files,
            passed,
            failed,
            notes: Vec::new(),
        }
    }

    /// A run that found nothing to validate. Never successful.
    pub fn empty(target: impl Into<PathBuf>, note: impl Into<String>) -> Self {
        let mut result = Self::from_results(target, Vec::new());
        result.notes.push(note.into());
        result
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }
}

/// Discovers files and validates each one.
#[derive(Debug, Clone)]
pub struct BatchRunner<L = ParquetLoader> {
    validator: Validator<L>,
    extension: String,
    parallel: bool,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::with_validator(Validator::new())
    }

    /// Build a Parquet runner from a configuration.
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::with_validator(Validator::new().with_options(config.validator_options()))
            .with_extension(&config.extension)
            .with_parallelism(config.parallel)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: RecordSetLoader> BatchRunner<L> {
    pub fn with_validator(validator: Validator<L>) -> Self {
        Self {
            validator,
            extension: "parquet".to_string(),
            parallel: false,
        }
    }

    /// Extension matched during directory discovery (case-insensitive).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Enables or disables parallel validation.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate `target`, which may be one file or a directory.
    pub fn run(&self, target: &Path) -> Result<BatchResult, BatchError> {
        if target.is_file() {
            debug!(target = %target.display(), "validating single file");
            let result = self.validator.validate(target);
            return Ok(BatchResult::from_results(target, vec![result]));
        }

        if !target.exists() {
            return Err(BatchError::PathNotFound(target.to_path_buf()));
        }
        if !target.is_dir() {
            return Err(BatchError::InvalidPath(target.to_path_buf()));
        }

        let files = self.discover(target)?;
        if files.is_empty() {
            info!(dir = %target.display(), extension = %self.extension, "no files found");
            return Ok(BatchResult::empty(
                target,
                format!(
                    "no .{} files found in {}",
                    self.extension,
                    target.display()
                ),
            ));
        }

        info!(count = files.len(), dir = %target.display(), "validating directory");
        let results = self.validate_all(&files);
        Ok(BatchResult::from_results(target, results))
    }

    /// Files directly inside `dir` with the configured extension, sorted by name.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
        let io_err = |source: std::io::Error| BatchError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && self.has_extension(&path) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    fn validate_all(&self, files: &[PathBuf]) -> Vec<FileResult> {
        if self.parallel {
            files
                .par_iter()
                .map(|path| self.validator.validate(path))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.validator.validate(path))
                .collect()
        }
    }
}
