//! Engine configuration, loaded from TOML.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{EngineConfig, LoggingConfig, RuntimeConfig, ValidationConfig, LOG_LEVELS};
