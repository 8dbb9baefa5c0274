//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    assert!(validate(&AttireConfig::default()).is_ok());
}

#[test]
fn catches_empty_model_name() {
    let mut config = AttireConfig::default();
    config.model.model = Some("  ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.model"));
}

#[test]
fn catches_non_http_endpoint() {
    let mut config = AttireConfig::default();
    config.model.endpoint = Some("localhost:11434".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.endpoint"));
}

#[test]
fn accepts_https_endpoint() {
    let mut config = AttireConfig::default();
    config.model.endpoint = Some("https://models.example.com".into());
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_blank_api_key_env_for_gemini() {
    let mut config = AttireConfig::default();
    config.model.backend = Backend::Gemini;
    config.model.api_key_env = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.api_key_env"));
}

#[test]
fn blank_api_key_env_is_fine_for_ollama() {
    let mut config = AttireConfig::default();
    config.model.api_key_env = String::new();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_timeouts_out_of_range() {
    let mut config = AttireConfig::default();
    config.model.connect_timeout_secs = 0;
    config.model.request_timeout_secs = 7200;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.connect_timeout_secs"));
    assert!(err.contains("model.request_timeout_secs"));
}

#[test]
fn catches_max_tokens_too_small() {
    let mut config = AttireConfig::default();
    config.model.max_tokens = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("model.max_tokens"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = AttireConfig::default();
    config.generation.temperature = 2.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.temperature"));
}

#[test]
fn catches_nan_temperature() {
    let mut config = AttireConfig::default();
    config.generation.temperature = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.temperature"));
}

#[test]
fn catches_top_k_zero() {
    let mut config = AttireConfig::default();
    config.generation.top_k = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.top_k"));
}

#[test]
fn catches_empty_weather_options() {
    let mut config = AttireConfig::default();
    config.panel.weather_options.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("panel.weather_options must not be empty"));
}

#[test]
fn catches_duplicate_occasion() {
    let mut config = AttireConfig::default();
    config.panel.occasion_options.push("Casual".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("\"Casual\" more than once"));
}

#[test]
fn catches_blank_option() {
    let mut config = AttireConfig::default();
    config.panel.weather_options.push(" ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("panel.weather_options[7] is blank"));
}

#[test]
fn collects_all_errors() {
    let mut config = AttireConfig::default();
    config.generation.top_k = 500;
    config.panel.max_preferences_len = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("generation.top_k"));
    assert!(err.contains("panel.max_preferences_len"));
    assert!(err.contains("; "));
}
