//! Ollama service struct and wire types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::build_client;
use crate::{GenerationParams, Message, Role};

pub(crate) const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Ollama's own defaults, used when a model does not override them.
pub(crate) const OLLAMA_DEFAULT_TEMPERATURE: f64 = 0.8;
pub(crate) const OLLAMA_DEFAULT_TOP_K: u32 = 40;

/// Ollama backend configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    /// Upper bound on generated tokens (`num_predict`).
    pub max_tokens: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl OllamaConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            base_url: OLLAMA_DEFAULT_URL.to_string(),
            model: model.into(),
            max_tokens: 1024,
            connect_timeout: Duration::from_secs(10),
            // Local inference can be slow on first load.
            request_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

/// Ollama-backed model service.
pub struct OllamaService {
    pub(crate) config: OllamaConfig,
    pub(crate) http: reqwest::Client,
}

impl OllamaService {
    pub fn new(config: OllamaConfig) -> Self {
        let http = build_client(config.connect_timeout, config.request_timeout);
        Self { config, http }
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.config.base_url, endpoint)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) messages: Vec<ChatMessage<'a>>,
    pub(crate) stream: bool,
    pub(crate) options: Options,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub(crate) role: &'static str,
    pub(crate) content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Options {
    pub(crate) temperature: f64,
    pub(crate) top_k: u32,
    pub(crate) num_predict: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub(crate) message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub(crate) content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShowRequest<'a> {
    pub(crate) model: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowResponse {
    /// Modelfile parameters, one `name value` pair per line.
    #[serde(default)]
    pub(crate) parameters: Option<String>,
}

pub(crate) fn build_chat_request<'a>(
    model: &'a str,
    system_instruction: &'a str,
    history: &'a [Message],
    prompt: &'a str,
    params: GenerationParams,
    max_tokens: u32,
) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage {
        role: "system",
        content: system_instruction,
    });
    for msg in history {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        messages.push(ChatMessage {
            role,
            content: &msg.content,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });

    ChatRequest {
        model,
        messages,
        stream: false,
        options: Options {
            temperature: params.temperature,
            top_k: params.top_k,
            num_predict: max_tokens,
        },
    }
}

/// Extract temperature and top_k from a Modelfile parameter block, falling
/// back to Ollama's defaults for anything not set.
pub(crate) fn parse_parameters(parameters: Option<&str>) -> GenerationParams {
    let mut params = GenerationParams::new(OLLAMA_DEFAULT_TEMPERATURE, OLLAMA_DEFAULT_TOP_K);
    for line in parameters.unwrap_or_default().lines() {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some("temperature"), Some(value)) => {
                if let Ok(t) = value.parse() {
                    params.temperature = t;
                }
            }
            (Some("top_k"), Some(value)) => {
                if let Ok(k) = value.parse() {
                    params.top_k = k;
                }
            }
            _ => {}
        }
    }
    params
}
