//! Language-model engine for attire.
//!
//! Provides:
//! - The model service contract (`ModelService` / `ModelSession`)
//! - `SessionManager`, owner of the single lazily created session
//! - The fixed system instruction and outfit prompt template
//! - Ollama (on-device) and Gemini (hosted) backends

pub mod gemini;
mod http;
pub mod ollama;
pub mod params;
pub mod prompt;
#[cfg(any(test, feature = "test-support"))]
pub mod scripted;
pub mod session;
pub mod unavailable;

use async_trait::async_trait;

pub use gemini::{GeminiConfig, GeminiService};
pub use ollama::{OllamaConfig, OllamaService};
pub use params::{GenerationParams, SessionConfig};
pub use prompt::{build_prompt, PromptRequest, SYSTEM_INSTRUCTION};
pub use session::{SessionManager, SessionState};
pub use unavailable::UnavailableService;

/// A language-model service able to open conversational sessions.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Default generation parameters advertised by the service.
    async fn capabilities(&self) -> Result<GenerationParams, AiError>;

    /// Open a new session bound to `config` for its whole lifetime.
    async fn create_session(
        &self,
        config: &SessionConfig,
    ) -> Result<Box<dyn ModelSession>, AiError>;
}

/// A stateful conversation opened by a [`ModelService`].
#[async_trait]
pub trait ModelSession: Send {
    /// Submit a prompt and wait for the complete text reply.
    async fn prompt(&mut self, text: &str) -> Result<String, AiError>;

    /// Release the session. Best-effort; callers log and ignore failures.
    async fn destroy(&mut self) -> Result<(), AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AiError {
    /// No usable model service in this environment.
    #[error("language model unavailable: {0}")]
    Unsupported(String),
    /// Message reported by the model service, verbatim (may be empty).
    #[error("{0}")]
    Api(String),
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    /// Another prompt is still in flight on the session manager.
    #[error("a prompt is already in progress")]
    Busy,
}
