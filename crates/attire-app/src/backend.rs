//! Model service selection from config.

use std::sync::Arc;
use std::time::Duration;

use attire_ai::{
    GeminiConfig, GeminiService, ModelService, OllamaConfig, OllamaService, UnavailableService,
};
use attire_config::schema::{Backend, ModelConfig};
use tracing::{info, warn};

/// Build the configured model service.
///
/// A backend that cannot be set up (missing API key) yields an
/// [`UnavailableService`], so the failure surfaces through the panel instead
/// of aborting startup.
pub fn build_service(config: &ModelConfig) -> Arc<dyn ModelService> {
    let connect = Duration::from_secs(config.connect_timeout_secs);
    let request = Duration::from_secs(config.request_timeout_secs);

    match config.backend {
        Backend::Ollama => {
            let mut ollama = OllamaConfig::new(config.model_name())
                .with_max_tokens(config.max_tokens)
                .with_timeouts(connect, request);
            if let Some(endpoint) = &config.endpoint {
                ollama = ollama.with_base_url(endpoint);
            }
            info!(model = %ollama.model, url = %ollama.base_url, "Using Ollama backend");
            Arc::new(OllamaService::new(ollama))
        }
        Backend::Gemini => match GeminiConfig::from_env(&config.api_key_env) {
            Ok(gemini) => {
                let mut gemini = gemini
                    .with_model(config.model_name())
                    .with_max_tokens(config.max_tokens)
                    .with_timeouts(connect, request);
                if let Some(endpoint) = &config.endpoint {
                    gemini = gemini.with_base_url(endpoint);
                }
                info!(model = %gemini.model, "Using Gemini backend");
                Arc::new(GeminiService::new(gemini))
            }
            Err(e) => {
                warn!(error = %e, "Gemini backend unavailable");
                let reason = match e {
                    attire_ai::AiError::Unsupported(reason) => reason,
                    other => other.to_string(),
                };
                Arc::new(UnavailableService::new(reason))
            }
        },
    }
}
