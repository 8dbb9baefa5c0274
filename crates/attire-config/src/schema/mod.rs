//! Configuration schema types for attire.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod generation;
mod model;
mod panel;
mod system;

pub use generation::*;
pub use model::*;
pub use panel::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for attire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttireConfig {
    pub model: ModelConfig,
    pub generation: GenerationConfig,
    pub panel: PanelConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_section() {
        let config = AttireConfig::default();
        assert_eq!(config.model.backend, Backend::Ollama);
        assert!(config.model.model.is_none());
        assert_eq!(config.model.model_name(), "llama3.2");
        assert!(config.model.endpoint.is_none());
        assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.model.connect_timeout_secs, 10);
        assert_eq!(config.model.request_timeout_secs, 300);
        assert_eq!(config.model.max_tokens, 1024);
    }

    #[test]
    fn default_generation_section() {
        let config = AttireConfig::default();
        assert!((config.generation.temperature - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.generation.top_k, 3);
    }

    #[test]
    fn default_panel_section() {
        let config = AttireConfig::default();
        assert!(config.panel.weather_options.iter().any(|w| w == "Rainy"));
        assert!(config
            .panel
            .occasion_options
            .iter()
            .any(|o| o == "Business Meeting"));
        assert_eq!(config.panel.max_preferences_len, 4096);
    }

    #[test]
    fn backend_uses_lowercase_names() {
        let parsed: ModelConfig = toml::from_str("backend = \"gemini\"").unwrap();
        assert_eq!(parsed.backend, Backend::Gemini);
        let parsed: ModelConfig = toml::from_str("backend = \"ollama\"").unwrap();
        assert_eq!(parsed.backend, Backend::Ollama);
    }

    #[test]
    fn log_level_uses_lowercase_names() {
        let parsed: LoggingConfig = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(parsed.level, LogLevel::Debug);
        assert_eq!(parsed.level.as_directive(), "debug");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: AttireConfig = toml::from_str(
            r#"
[generation]
temperature = 0.4
"#,
        )
        .unwrap();
        assert!((config.generation.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.generation.top_k, 3);
        assert_eq!(config.model.backend, Backend::Ollama);
    }
}
