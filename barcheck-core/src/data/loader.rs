use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves a path to an in-memory record set.
///
/// The validator never inspects file bytes itself; everything goes through
/// this seam so tests and alternative formats can plug in their own loader.
pub trait RecordSetLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<DataFrame, LoadError>;
}

/// Loads Parquet files with the Polars reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetLoader;

impl RecordSetLoader for ParquetLoader {
    fn load(&self, path: &Path) -> Result<DataFrame, LoadError> {
        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Open {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        ParquetReader::new(file)
            .finish()
            .map_err(|e| LoadError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },
}
