//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod generation;
mod helpers;
mod model;
mod panel;

#[cfg(test)]
mod tests;

use crate::schema::AttireConfig;
use attire_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AttireConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    model::validate_model(&mut errors, config);
    generation::validate_generation(&mut errors, config);
    panel::validate_panel(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
