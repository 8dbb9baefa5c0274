//! Programmable in-memory model service for tests.
//!
//! Replies and failures are queued up front; every creation, prompt and
//! destruction is recorded so tests can assert on the session lifecycle.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::{AiError, GenerationParams, ModelService, ModelSession, SessionConfig};

/// Reply used when no reply has been queued.
pub const DEFAULT_REPLY: &str = "ok";

#[derive(Default)]
struct Script {
    capabilities: Option<Result<GenerationParams, AiError>>,
    create_failures: VecDeque<AiError>,
    replies: VecDeque<Result<String, AiError>>,
    destroy_fails: bool,
    configs: Vec<SessionConfig>,
    prompts: Vec<String>,
    destroyed: usize,
}

/// A [`ModelService`] whose behaviour is scripted by the test.
#[derive(Clone, Default)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
    gate: Option<Arc<Semaphore>>,
}

/// Releases prompts held by a gated [`ScriptedService`], one per call.
#[derive(Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    pub fn open(&self) {
        self.0.add_permits(1);
    }
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service whose prompts block until the returned [`Gate`] is opened.
    pub fn gated() -> (Self, Gate) {
        let semaphore = Arc::new(Semaphore::new(0));
        let service = Self {
            script: Arc::default(),
            gate: Some(semaphore.clone()),
        };
        (service, Gate(semaphore))
    }

    pub fn set_capabilities(&self, result: Result<GenerationParams, AiError>) {
        self.lock().capabilities = Some(result);
    }

    /// Make the next `create_session` call fail with `error`.
    pub fn fail_next_create(&self, error: AiError) {
        self.lock().create_failures.push_back(error);
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.lock().replies.push_back(Ok(text.into()));
    }

    /// Make the next prompt fail with `error`.
    pub fn fail_next_prompt(&self, error: AiError) {
        self.lock().replies.push_back(Err(error));
    }

    pub fn fail_destroy(&self) {
        self.lock().destroy_fails = true;
    }

    /// Number of sessions successfully created.
    pub fn created(&self) -> usize {
        self.lock().configs.len()
    }

    pub fn destroyed(&self) -> usize {
        self.lock().destroyed
    }

    /// Configs of every successfully created session, in order.
    pub fn configs(&self) -> Vec<SessionConfig> {
        self.lock().configs.clone()
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ModelService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn capabilities(&self) -> Result<GenerationParams, AiError> {
        self.lock()
            .capabilities
            .clone()
            .unwrap_or_else(|| Ok(GenerationParams::default()))
    }

    async fn create_session(
        &self,
        config: &SessionConfig,
    ) -> Result<Box<dyn ModelSession>, AiError> {
        let mut script = self.lock();
        if let Some(error) = script.create_failures.pop_front() {
            return Err(error);
        }
        script.configs.push(config.clone());
        Ok(Box::new(ScriptedSession {
            service: self.clone(),
        }))
    }
}

struct ScriptedSession {
    service: ScriptedService,
}

#[async_trait]
impl ModelSession for ScriptedSession {
    async fn prompt(&mut self, text: &str) -> Result<String, AiError> {
        self.service.lock().prompts.push(text.to_string());
        if let Some(gate) = &self.service.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| AiError::Network(e.to_string()))?;
            permit.forget();
        }
        self.service
            .lock()
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_REPLY.to_string()))
    }

    async fn destroy(&mut self) -> Result<(), AiError> {
        let mut script = self.service.lock();
        script.destroyed += 1;
        if script.destroy_fails {
            return Err(AiError::Api("destroy failed".into()));
        }
        Ok(())
    }
}
