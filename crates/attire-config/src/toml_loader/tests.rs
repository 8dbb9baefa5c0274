//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{AttireConfig, Backend};
use attire_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let err = load_from_path(Path::new("/tmp/nonexistent_attire_config.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[model]
backend = "gemini"
model = "gemini-2.0-flash"

[generation]
top_k = 8
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.model.backend, Backend::Gemini);
    assert_eq!(config.model.model_name(), "gemini-2.0-flash");
    assert_eq!(config.generation.top_k, 8);
    // Defaults preserved
    assert!((config.generation.temperature - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.panel.max_preferences_len, 4096);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn load_out_of_range_values_returns_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generation]
top_k = 0
"#,
    )
    .unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("generation.top_k"));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("attire").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.model.backend, Backend::Ollama);
    assert_eq!(config.generation.top_k, 3);
}

#[test]
fn default_config_toml_parses_to_defaults() {
    let config: AttireConfig = toml::from_str(default_config_toml()).unwrap();
    assert_eq!(config.model.model_name(), "llama3.2");
    assert_eq!(config.panel.weather_options.len(), 7);
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("attire"));
        assert!(path_str.ends_with("config.toml"));
    }
}
