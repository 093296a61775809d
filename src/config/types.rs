use serde::{Deserialize, Serialize};

/// Root engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Action dispatcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Route used when a navigate action names none.
    #[serde(default = "default_route")]
    pub default_route: String,
    /// Store key that receives the JSON payload of `show_dialog`.
    #[serde(default = "default_dialog_state_key")]
    pub dialog_state_key: String,
    /// Upper bound for one API call or form submission.
    #[serde(default = "default_http_timeout_seconds")]
    pub default_http_timeout_seconds: u64,
}

/// Validation engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Nesting deeper than this is reported as a warning.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_true")]
    pub check_duplicate_ids: bool,
    /// Report `visible = false` nodes as info.
    #[serde(default = "default_true")]
    pub warn_hidden: bool,
}

/// Tracing output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file prefix. Logs go to stderr when unset.
    #[serde(default)]
    pub file: Option<String>,
}

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

fn default_route() -> String {
    "home".to_string()
}

fn default_dialog_state_key() -> String {
    "dialog".to_string()
}

fn default_http_timeout_seconds() -> u64 {
    30
}

fn default_max_depth() -> usize {
    32
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_route: default_route(),
            dialog_state_key: default_dialog_state_key(),
            default_http_timeout_seconds: default_http_timeout_seconds(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            check_duplicate_ids: true,
            warn_hidden: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
