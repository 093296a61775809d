use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{EngineConfig, LOG_LEVELS};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl EngineConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/sdui/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("sdui").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `EngineConfig::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path. Unlike
    /// [`load`](Self::load), a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `validation.max_depth` is non-zero
    /// - `runtime.default_route` is not blank
    /// - `runtime.default_http_timeout_seconds` is non-zero
    /// - `logging.level` is a known level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.max_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "validation.max_depth must be at least 1".to_string(),
            });
        }

        if self.runtime.default_route.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "runtime.default_route must not be blank".to_string(),
            });
        }

        if self.runtime.default_http_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "runtime.default_http_timeout_seconds must be at least 1".to_string(),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Unknown log level '{}', expected one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        Ok(())
    }
}
