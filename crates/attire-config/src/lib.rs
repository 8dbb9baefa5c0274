//! attire configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use attire_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AttireConfig, CONFIG_SCHEMA_VERSION};

use attire_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<AttireConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<AttireConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AttireConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&AttireConfig::default());
        assert!(json.contains("\"model\""));
        assert!(json.contains("\"generation\""));
        assert!(json.contains("\"panel\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&AttireConfig::default());
        let parsed: AttireConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.model.model.is_none());
        assert_eq!(parsed.generation.top_k, 3);
    }

    #[test]
    fn load_config_from_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.logging.level, schema::LogLevel::Warn);
    }
}
