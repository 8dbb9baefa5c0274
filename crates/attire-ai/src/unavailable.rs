//! Null model service for environments with no usable backend.

use async_trait::async_trait;

use crate::{AiError, GenerationParams, ModelService, ModelSession, SessionConfig};

/// Fails every call with `AiError::Unsupported`, carrying why no backend
/// could be configured.
pub struct UnavailableService {
    reason: String,
}

impl UnavailableService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl ModelService for UnavailableService {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn capabilities(&self) -> Result<GenerationParams, AiError> {
        Err(AiError::Unsupported(self.reason.clone()))
    }

    async fn create_session(
        &self,
        _config: &SessionConfig,
    ) -> Result<Box<dyn ModelSession>, AiError> {
        Err(AiError::Unsupported(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_reports_unsupported() {
        let service = UnavailableService::new("GEMINI_API_KEY is not set");

        let err = service.capabilities().await.unwrap_err();
        assert_eq!(err, AiError::Unsupported("GEMINI_API_KEY is not set".into()));

        let config = SessionConfig::new(GenerationParams::default());
        let err = service.create_session(&config).await.err().unwrap();
        assert!(matches!(err, AiError::Unsupported(_)));
    }
}
