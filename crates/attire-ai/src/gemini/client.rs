//! Gemini service struct, request building, and response parsing.

use serde_json::Value;

use crate::http::build_client;
use crate::{AiError, GenerationParams, Message, Role};

use super::config::GeminiConfig;

/// Gemini-backed model service.
pub struct GeminiService {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        let http = build_client(config.connect_timeout, config.request_timeout);
        Self { config, http }
    }

    /// `models/{model}` metadata URL, or `models/{model}:{method}` when a
    /// method is given.
    pub(crate) fn api_url(&self, method: Option<&str>) -> String {
        match method {
            Some(method) => format!("{}/{}:{}", self.config.base_url, self.config.model, method),
            None => format!("{}/{}", self.config.base_url, self.config.model),
        }
    }
}

/// Build the JSON request body for `generateContent`.
pub(crate) fn build_request_body(
    system_instruction: &str,
    history: &[Message],
    prompt: &str,
    params: GenerationParams,
    max_tokens: u32,
) -> Value {
    let mut contents = Vec::with_capacity(history.len() + 1);
    for msg in history {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        contents.push(serde_json::json!({
            "role": role,
            "parts": [{ "text": msg.content }]
        }));
    }
    contents.push(serde_json::json!({
        "role": "user",
        "parts": [{ "text": prompt }]
    }));

    serde_json::json!({
        "systemInstruction": { "parts": [{ "text": system_instruction }] },
        "contents": contents,
        "generationConfig": {
            "temperature": params.temperature,
            "topK": params.top_k,
            "maxOutputTokens": max_tokens,
        }
    })
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn parse_response(json: &Value) -> Result<String, AiError> {
    if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
        return Err(AiError::Api(format!("prompt blocked: {reason}")));
    }

    let first = json["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| AiError::Parse("no candidates in response".to_string()))?;

    let parts = first["content"]["parts"]
        .as_array()
        .ok_or_else(|| AiError::Parse("candidate has no content parts".to_string()))?;

    Ok(parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect())
}

/// Read the default sampling parameters from model metadata.
pub(crate) fn parse_capabilities(json: &Value) -> Result<GenerationParams, AiError> {
    let temperature = json["temperature"]
        .as_f64()
        .ok_or_else(|| AiError::Parse("model metadata has no temperature".to_string()))?;
    let top_k = json["topK"]
        .as_u64()
        .ok_or_else(|| AiError::Parse("model metadata has no topK".to_string()))?;
    let top_k = u32::try_from(top_k).map_err(|_| AiError::Parse(format!("topK {top_k} out of range")))?;
    Ok(GenerationParams::new(temperature, top_k))
}
