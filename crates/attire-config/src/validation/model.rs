//! Model backend validation (name, endpoint, timeouts, token budget).

use crate::schema::{AttireConfig, Backend};

use super::helpers::validate_range;

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &AttireConfig) {
    let model = &config.model;

    if model.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
        errors.push("model.model must not be empty".to_string());
    }
    if let Some(endpoint) = &model.endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            errors.push(format!("model.endpoint = {endpoint} must be an http(s) URL"));
        }
    }
    if model.backend == Backend::Gemini && model.api_key_env.trim().is_empty() {
        errors.push("model.api_key_env must name an environment variable".to_string());
    }

    validate_range(
        errors,
        "model.connect_timeout_secs",
        model.connect_timeout_secs,
        1,
        60,
    );
    validate_range(
        errors,
        "model.request_timeout_secs",
        model.request_timeout_secs,
        5,
        3600,
    );
    validate_range(
        errors,
        "model.max_tokens",
        u64::from(model.max_tokens),
        64,
        8192,
    );
}
