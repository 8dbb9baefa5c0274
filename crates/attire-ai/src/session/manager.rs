//! SessionManager: lazy creation, submission, and teardown.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use attire_common::SessionId;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::prompt::SYSTEM_INSTRUCTION;
use crate::{AiError, GenerationParams, ModelService, SessionConfig};

use super::types::{ActiveSession, BusyGuard, SessionState};

/// Sole owner of the (at most one) live model session.
pub struct SessionManager {
    service: Arc<dyn ModelService>,
    system_instruction: String,
    /// Held across create + prompt, so no caller sees a half-built session.
    slot: Mutex<Option<ActiveSession>>,
    /// Set while a submission is in flight.
    busy: AtomicBool,
    created: AtomicU64,
}

impl SessionManager {
    pub fn new(service: Arc<dyn ModelService>) -> Self {
        Self {
            service,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            slot: Mutex::new(None),
            busy: AtomicBool::new(false),
            created: AtomicU64::new(0),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn service(&self) -> &Arc<dyn ModelService> {
        &self.service
    }

    /// Submit `prompt` on a session matching `params`, creating it first if
    /// needed.
    ///
    /// A session built from different parameters is destroyed and replaced.
    /// If creation or the prompt fails, the session is destroyed, the slot
    /// is left empty and the error is returned unchanged. A call made while
    /// another is in flight fails with `AiError::Busy` and leaves the live
    /// session alone.
    pub async fn ensure_and_submit(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let mut slot = self.slot.lock().await;

        let mut active = match slot.take() {
            Some(active) if active.params == params => active,
            Some(stale) => {
                debug!(session_id = %stale.id, "Generation parameters changed, replacing session");
                destroy_quietly(stale).await;
                self.create(params).await?
            }
            None => self.create(params).await?,
        };

        debug!(session_id = %active.id, len = prompt.len(), "Submitting prompt");
        match active.handle.prompt(prompt).await {
            Ok(text) => {
                debug!(session_id = %active.id, len = text.len(), "Prompt completed");
                *slot = Some(active);
                Ok(text)
            }
            Err(e) => {
                warn!(session_id = %active.id, error = %e, "Prompt failed, dropping session");
                destroy_quietly(active).await;
                Err(e)
            }
        }
    }

    /// Destroy the live session, if any. Idempotent.
    ///
    /// Waits for an in-flight submission to finish first.
    pub async fn reset(&self) {
        let stale = self.slot.lock().await.take();
        match stale {
            Some(active) => destroy_quietly(active).await,
            None => debug!("Reset with no live session"),
        }
    }

    pub async fn state(&self) -> SessionState {
        if self.slot.lock().await.is_some() {
            SessionState::HasSession
        } else {
            SessionState::NoSession
        }
    }

    pub async fn has_session(&self) -> bool {
        self.state().await == SessionState::HasSession
    }

    /// Parameters of the live session, if any.
    pub async fn current_params(&self) -> Option<GenerationParams> {
        self.slot.lock().await.as_ref().map(|active| active.params)
    }

    /// Number of sessions created over the manager's lifetime.
    pub fn sessions_created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    /// Whether a submission is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    async fn create(&self, params: GenerationParams) -> Result<ActiveSession, AiError> {
        let config = SessionConfig::new(params).with_system_instruction(&self.system_instruction);
        let handle = match self.service.create_session(&config).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(service = self.service.name(), error = %e, "Session creation failed");
                return Err(e);
            }
        };

        self.created.fetch_add(1, Ordering::Relaxed);
        let id = SessionId::new();
        info!(
            session_id = %id,
            service = self.service.name(),
            temperature = params.temperature,
            top_k = params.top_k,
            "Model session created"
        );
        Ok(ActiveSession { id, params, handle })
    }
}

/// Destroy a session, logging instead of propagating failures.
async fn destroy_quietly(mut active: ActiveSession) {
    match active.handle.destroy().await {
        Ok(()) => debug!(session_id = %active.id, "Model session destroyed"),
        Err(e) => warn!(session_id = %active.id, error = %e, "Failed to destroy model session"),
    }
}
