//! Model backend configuration.

use serde::{Deserialize, Serialize};

/// Which language-model service backs the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local Ollama server (on-device inference).
    #[default]
    Ollama,
    /// Google Gemini Generative Language API.
    Gemini,
}

impl Backend {
    /// Model used when `model.model` is not set.
    pub fn default_model(&self) -> &'static str {
        match self {
            Backend::Ollama => "llama3.2",
            Backend::Gemini => "gemini-2.0-flash",
        }
    }
}

/// Model service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub backend: Backend,
    /// Model name. `None` uses the backend's default model.
    pub model: Option<String>,
    /// Base URL override. `None` uses the backend's standard endpoint.
    pub endpoint: Option<String>,
    /// Environment variable holding the API key (Gemini only).
    pub api_key_env: String,
    /// Valid range: 1-60.
    pub connect_timeout_secs: u64,
    /// Valid range: 5-3600.
    pub request_timeout_secs: u64,
    /// Valid range: 64-8192.
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Ollama,
            model: None,
            endpoint: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
            max_tokens: 1024,
        }
    }
}

impl ModelConfig {
    /// The configured model, or the backend's default.
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }
}
