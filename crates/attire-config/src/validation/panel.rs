//! Panel form validation.

use crate::schema::AttireConfig;

use super::helpers::{validate_options, validate_range};

pub(crate) fn validate_panel(errors: &mut Vec<String>, config: &AttireConfig) {
    validate_options(errors, "panel.weather_options", &config.panel.weather_options);
    validate_options(
        errors,
        "panel.occasion_options",
        &config.panel.occasion_options,
    );
    validate_range(
        errors,
        "panel.max_preferences_len",
        config.panel.max_preferences_len as u64,
        1,
        65536,
    );
}
