//! ModelService / ModelSession implementations for Ollama.

use async_trait::async_trait;
use tracing::debug;

use crate::http::{check_status, network_error, read_json};
use crate::{AiError, GenerationParams, Message, ModelService, ModelSession, SessionConfig};

use super::client::{
    build_chat_request, parse_parameters, ChatResponse, OllamaService, ShowRequest, ShowResponse,
};

#[async_trait]
impl ModelService for OllamaService {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn capabilities(&self) -> Result<GenerationParams, AiError> {
        debug!(model = %self.config.model, "Ollama show request");

        let response = self
            .http
            .post(self.url("show"))
            .json(&ShowRequest {
                model: &self.config.model,
            })
            .send()
            .await
            .map_err(network_error)?;
        let show: ShowResponse = read_json(check_status(response).await?).await?;

        Ok(parse_parameters(show.parameters.as_deref()))
    }

    async fn create_session(
        &self,
        config: &SessionConfig,
    ) -> Result<Box<dyn ModelSession>, AiError> {
        Ok(Box::new(OllamaSession {
            url: self.url("chat"),
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            http: self.http.clone(),
            system_instruction: config.system_instruction.clone(),
            params: config.params,
            history: Vec::new(),
        }))
    }
}

/// One Ollama conversation.
struct OllamaSession {
    url: String,
    model: String,
    max_tokens: u32,
    http: reqwest::Client,
    system_instruction: String,
    params: GenerationParams,
    history: Vec<Message>,
}

#[async_trait]
impl ModelSession for OllamaSession {
    async fn prompt(&mut self, text: &str) -> Result<String, AiError> {
        let request = build_chat_request(
            &self.model,
            &self.system_instruction,
            &self.history,
            text,
            self.params,
            self.max_tokens,
        );

        debug!(model = %self.model, turns = self.history.len(), "Ollama chat request");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AiError::Network(format!("{e}. Is Ollama running? (ollama serve)"))
                } else {
                    network_error(e)
                }
            })?;
        let chat: ChatResponse = read_json(check_status(response).await?).await?;
        let reply = chat.message.content;

        self.history.push(Message::user(text));
        self.history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    async fn destroy(&mut self) -> Result<(), AiError> {
        self.history.clear();
        Ok(())
    }
}
