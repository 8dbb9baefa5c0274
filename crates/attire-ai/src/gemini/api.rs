//! ModelService / ModelSession implementations for Gemini.

use async_trait::async_trait;
use tracing::debug;

use crate::http::{check_status, network_error, read_json};
use crate::{AiError, GenerationParams, Message, ModelService, ModelSession, SessionConfig};

use super::client::{build_request_body, parse_capabilities, parse_response, GeminiService};
use super::config::GeminiConfig;

#[async_trait]
impl ModelService for GeminiService {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn capabilities(&self) -> Result<GenerationParams, AiError> {
        let url = self.api_url(None);
        debug!(model = %self.config.model, "Gemini model metadata request");

        let response = self
            .http
            .get(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(network_error)?;
        let json: serde_json::Value = read_json(check_status(response).await?).await?;

        parse_capabilities(&json)
    }

    async fn create_session(
        &self,
        config: &SessionConfig,
    ) -> Result<Box<dyn ModelSession>, AiError> {
        Ok(Box::new(GeminiSession {
            url: self.api_url(Some("generateContent")),
            config: self.config.clone(),
            http: self.http.clone(),
            system_instruction: config.system_instruction.clone(),
            params: config.params,
            history: Vec::new(),
        }))
    }
}

/// One Gemini conversation.
struct GeminiSession {
    url: String,
    config: GeminiConfig,
    http: reqwest::Client,
    system_instruction: String,
    params: GenerationParams,
    history: Vec<Message>,
}

#[async_trait]
impl ModelSession for GeminiSession {
    async fn prompt(&mut self, text: &str) -> Result<String, AiError> {
        let body = build_request_body(
            &self.system_instruction,
            &self.history,
            text,
            self.params,
            self.config.max_tokens,
        );

        debug!(model = %self.config.model, turns = self.history.len(), "Gemini API request");

        let response = self
            .http
            .post(&self.url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        let json: serde_json::Value = read_json(check_status(response).await?).await?;
        let reply = parse_response(&json)?;

        self.history.push(Message::user(text));
        self.history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    async fn destroy(&mut self) -> Result<(), AiError> {
        self.history.clear();
        Ok(())
    }
}
