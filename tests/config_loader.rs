use sdui::config::{ConfigError, EngineConfig};
use std::fs;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

/// Defaults match the documented values.
#[test]
fn test_config_default_values() {
    let config = EngineConfig::default();

    assert_eq!(config.runtime.default_route, "home");
    assert_eq!(config.runtime.dialog_state_key, "dialog");
    assert_eq!(config.runtime.default_http_timeout_seconds, 30);

    assert_eq!(config.validation.max_depth, 32);
    assert!(config.validation.check_duplicate_ids);
    assert!(config.validation.warn_hidden);

    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = EngineConfig::config_path();
    assert!(path.ends_with("sdui/config.toml"));
}

/// Sections left out keep their defaults.
#[test]
fn test_partial_toml_fills_defaults() {
    let (_dir, path) = write_config(
        r#"
[runtime]
default_route = "dashboard"

[validation]
warn_hidden = false
"#,
    );

    let config = EngineConfig::load_from(&path).unwrap();
    assert_eq!(config.runtime.default_route, "dashboard");
    assert_eq!(config.runtime.default_http_timeout_seconds, 30);
    assert!(!config.validation.warn_hidden);
    assert_eq!(config.validation.max_depth, 32);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_toml() {
    let (_dir, path) = write_config(
        r#"
[runtime]
default_route = "start"
dialog_state_key = "modal"
default_http_timeout_seconds = 5

[validation]
max_depth = 8
check_duplicate_ids = false

[logging]
level = "DEBUG"
file = "/tmp/sdui.log"
"#,
    );

    let config = EngineConfig::load_from(&path).unwrap();
    assert_eq!(config.runtime.dialog_state_key, "modal");
    assert_eq!(config.runtime.default_http_timeout_seconds, 5);
    assert_eq!(config.validation.max_depth, 8);
    assert!(!config.validation.check_duplicate_ids);
    assert_eq!(config.logging.file.as_deref(), Some("/tmp/sdui.log"));
}

#[test]
fn test_parse_invalid_toml() {
    let (_dir, path) = write_config("[runtime\ndefault_route = ");
    let result = EngineConfig::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_wrong_value_type_is_parse_error() {
    let (_dir, path) = write_config("[validation]\nmax_depth = \"deep\"\n");
    let result = EngineConfig::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_rejects_unknown_level() {
    let (_dir, path) = write_config("[logging]\nlevel = \"loud\"\n");
    match EngineConfig::load_from(&path) {
        Err(ConfigError::ValidationError { message }) => assert!(message.contains("loud")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_zero_timeout() {
    let (_dir, path) = write_config("[runtime]\ndefault_http_timeout_seconds = 0\n");
    let result = EngineConfig::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn test_load_from_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    match EngineConfig::load_from(&missing) {
        Err(err @ ConfigError::ReadError { .. }) => {
            assert!(err.to_string().contains("nope.toml"));
        }
        other => panic!("expected read error, got {:?}", other),
    }
}
