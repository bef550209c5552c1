//! Serializable validation configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all) is a
//! valid configuration:
//!
//! ```toml
//! extension = "parquet"
//! parallel = false
//! strict_columns = false
//! integer_timestamp_unit = "ns"   # s | ms | us | ns
//! ```

use barcheck_core::checks::EpochUnit;
use barcheck_core::ValidatorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// File extension matched during directory discovery (no leading dot).
    pub extension: String,
    /// Validate files on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Missing expected columns fail the file instead of warning.
    pub strict_columns: bool,
    /// Unit of integer timestamp columns.
    pub integer_timestamp_unit: EpochUnit,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            extension: "parquet".to_string(),
            parallel: false,
            strict_columns: false,
            integer_timestamp_unit: EpochUnit::Ns,
        }
    }
}

impl ValidationConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and normalise a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.normalize()?;
        Ok(config)
    }

    /// Strip a leading dot from the extension and reject empty values.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        let ext = self.extension.trim().trim_start_matches('.').to_string();
        if ext.is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".into()));
        }
        self.extension = ext;
        Ok(())
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            integer_timestamp_unit: self.integer_timestamp_unit,
            strict_columns: self.strict_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = ValidationConfig::from_toml("").unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.extension, "parquet");
    }

    #[test]
    fn parses_all_fields() {
        let config = ValidationConfig::from_toml(
            r#"
extension = ".PQ"
parallel = true
strict_columns = true
integer_timestamp_unit = "ms"
"#,
        )
        .unwrap();
        assert_eq!(config.extension, "PQ");
        assert!(config.parallel);
        assert!(config.strict_columns);
        assert_eq!(config.integer_timestamp_unit, EpochUnit::Ms);

        let opts = config.validator_options();
        assert!(opts.strict_columns);
        assert_eq!(opts.integer_timestamp_unit, EpochUnit::Ms);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ValidationConfig::from_toml("recursive = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_bad_unit() {
        let err = ValidationConfig::from_toml(r#"integer_timestamp_unit = "days""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_empty_extension() {
        let err = ValidationConfig::from_toml(r#"extension = ".""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barcheck.toml");
        std::fs::write(&path, "parallel = true\n").unwrap();
        let config = ValidationConfig::from_file(&path).unwrap();
        assert!(config.parallel);

        let err = ValidationConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
