//! Codec configuration files.
//!
//! Stored as JSON. Every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::acoustic::{AcousticConfig, AcousticError};

/// Errors that can occur while loading or saving a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] AcousticError),
}

/// Top-level configuration for both channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Modulation and demodulation parameters.
    pub acoustic: AcousticConfig,
}

impl CodecConfig {
    /// Loads and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: CodecConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Writes the configuration as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), AcousticError> {
        self.acoustic.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codec.json");

        let config = CodecConfig {
            acoustic: AcousticConfig::default().with_sample_rate(48_000),
        };
        config.save(&path).unwrap();

        assert_eq!(CodecConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_empty_object_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codec.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(CodecConfig::load(&path).unwrap(), CodecConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codec.json");
        std::fs::write(&path, r#"{"acoustic": {"freq_one_hz": 440.0}}"#).unwrap();

        assert!(matches!(CodecConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codec.json");

        std::fs::write(&path, r#"{"acoustic": {"tone_duration_secs": 1e300}}"#).unwrap();
        assert!(matches!(CodecConfig::load(&path), Err(ConfigError::Invalid(_))));

        std::fs::write(&path, r#"{"acoustic": {"analysis_resolution_hz": 1e-12}}"#).unwrap();
        assert!(matches!(CodecConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = CodecConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(CodecConfig::load_or_default(None).unwrap(), CodecConfig::default());
    }
}
