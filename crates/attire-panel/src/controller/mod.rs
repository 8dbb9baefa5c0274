//! Panel controller: maps intents to session operations and view updates.
//!
//! State changes happen synchronously in [`Panel::apply`], which returns the
//! slow follow-up work (capability query, session reset, model request) as an
//! [`Effect`]. Hosts that must stay responsive run effects on their own task;
//! [`Panel::dispatch`] runs them inline.


use std::sync::{Arc, Mutex, MutexGuard};

use attire_ai::{build_prompt, AiError, GenerationParams, PromptRequest, SessionManager};
use attire_common::new_correlation_id;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::intent::PanelIntent;
use crate::ipc::PanelUpdate;
use crate::settings::PanelSettings;
use crate::view::{render_response, temperature_label, ControlsState, Display};

/// Shown when a failure carries no message of its own.
pub const GENERATE_FAILED: &str = "Failed to generate advice";

/// Shown when the capability query fails for a reason other than an
/// unsupported environment.
pub const INIT_FAILED: &str = "Failed to initialize AI capabilities";

/// Asynchronous work requested by an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Initialize,
    ResetSession,
    Submit(Submission),
}

/// A model request captured at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub prompt: String,
    pub params: GenerationParams,
    /// Reset counter at submit time; a later reset makes the reply stale.
    epoch: u64,
    /// Short id tying the submit and completion log lines together.
    request_id: String,
}

#[derive(Debug, Default)]
struct Form {
    weather: String,
    occasion: String,
    preferences: String,
}

#[derive(Debug)]
struct PanelState {
    form: Form,
    params: GenerationParams,
    pending: bool,
    reset_enabled: bool,
    disabled: bool,
    display: Display,
    epoch: u64,
}

impl PanelState {
    fn submit_enabled(&self) -> bool {
        !self.disabled
            && !self.pending
            && !self.form.weather.is_empty()
            && !self.form.occasion.is_empty()
    }
}

/// The outfit panel.
pub struct Panel {
    manager: Arc<SessionManager>,
    settings: PanelSettings,
    state: Mutex<PanelState>,
    updates: mpsc::UnboundedSender<PanelUpdate>,
}

impl Panel {
    /// Create a panel and the receiver its view updates are pushed to.
    pub fn new(
        manager: Arc<SessionManager>,
        settings: PanelSettings,
    ) -> (Self, mpsc::UnboundedReceiver<PanelUpdate>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let state = PanelState {
            form: Form::default(),
            params: settings.default_params,
            pending: false,
            reset_enabled: false,
            disabled: false,
            display: Display::Hidden,
            epoch: 0,
        };
        let panel = Self {
            manager,
            settings,
            state: Mutex::new(state),
            updates,
        };
        (panel, rx)
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    /// Apply an intent and run its effect to completion.
    pub async fn dispatch(&self, intent: PanelIntent) {
        if let Some(effect) = self.apply(intent) {
            self.run(effect).await;
        }
    }

    /// Apply an intent to the panel state and emit the resulting updates.
    ///
    /// Returns the asynchronous work the intent requires, if any.
    pub fn apply(&self, intent: PanelIntent) -> Option<Effect> {
        let kind = intent.kind();
        let mut state = self.lock();

        if state.disabled && intent != PanelIntent::Ready {
            warn!(kind, "Panel disabled, ignoring intent");
            return None;
        }

        match intent {
            PanelIntent::Ready => return Some(Effect::Initialize),
            PanelIntent::SelectWeather(value) => {
                if !is_allowed(&value, &self.settings.weather_options) {
                    warn!(kind, value = %value, "Rejected weather outside configured options");
                    return None;
                }
                state.form.weather = value;
            }
            PanelIntent::SelectOccasion(value) => {
                if !is_allowed(&value, &self.settings.occasion_options) {
                    warn!(kind, value = %value, "Rejected occasion outside configured options");
                    return None;
                }
                state.form.occasion = value;
            }
            PanelIntent::EditPreferences(text) => {
                let len = text.chars().count();
                if len > self.settings.max_preferences_len {
                    warn!(
                        kind,
                        len,
                        max = self.settings.max_preferences_len,
                        "Rejected preferences: too long"
                    );
                    return None;
                }
                state.form.preferences = text;
            }
            PanelIntent::SetTemperature(temperature) => {
                state.params.temperature = temperature;
                state.reset_enabled = false;
                self.emit(self.controls(&state));
                return Some(Effect::ResetSession);
            }
            PanelIntent::SetTopK(top_k) => {
                state.params.top_k = top_k;
                state.reset_enabled = false;
                self.emit(self.controls(&state));
                return Some(Effect::ResetSession);
            }
            PanelIntent::Submit => {
                if !state.submit_enabled() {
                    warn!(
                        kind,
                        pending = state.pending,
                        weather = %state.form.weather,
                        occasion = %state.form.occasion,
                        "Submit ignored"
                    );
                    return None;
                }
                let request = PromptRequest::new(
                    state.form.weather.clone(),
                    state.form.occasion.clone(),
                    Some(state.form.preferences.clone()),
                );
                let request_id = new_correlation_id();
                info!(
                    request_id = %request_id,
                    weather = %request.weather,
                    occasion = %request.occasion,
                    temperature = state.params.temperature,
                    top_k = state.params.top_k,
                    "Outfit request submitted"
                );
                state.pending = true;
                state.display = Display::Loading;
                self.emit(PanelUpdate::Loading);
                self.emit(self.controls(&state));
                return Some(Effect::Submit(Submission {
                    prompt: build_prompt(&request),
                    params: state.params,
                    epoch: state.epoch,
                    request_id,
                }));
            }
            PanelIntent::Reset => {
                state.epoch += 1;
                state.display = Display::Hidden;
                state.form = Form::default();
                state.reset_enabled = false;
                self.emit(PanelUpdate::Cleared);
                self.emit(self.controls(&state));
                return Some(Effect::ResetSession);
            }
        }

        self.emit(self.controls(&state));
        None
    }

    /// Carry out an effect returned by [`Panel::apply`].
    pub async fn run(&self, effect: Effect) {
        match effect {
            Effect::Initialize => {
                let result = self.manager.service().capabilities().await;
                self.finish_initialize(result);
            }
            Effect::ResetSession => self.manager.reset().await,
            Effect::Submit(submission) => {
                let result = self
                    .manager
                    .ensure_and_submit(&submission.prompt, submission.params)
                    .await;
                self.finish_submit(&submission, result);
            }
        }
    }

    /// Current control state.
    pub fn controls_state(&self) -> ControlsState {
        let state = self.lock();
        self.controls(&state)
    }

    /// Current display region.
    pub fn display(&self) -> Display {
        self.lock().display.clone()
    }

    fn finish_initialize(&self, result: Result<GenerationParams, AiError>) {
        let mut state = self.lock();
        match result {
            Ok(params) => {
                info!(
                    temperature = params.temperature,
                    top_k = params.top_k,
                    "Model defaults loaded"
                );
                state.params = params;
            }
            Err(e @ AiError::Unsupported(_)) => {
                warn!(error = %e, "No usable language model, disabling panel");
                let message = e.to_string();
                state.disabled = true;
                state.display = Display::Error(message.clone());
                self.emit(PanelUpdate::Error { message });
            }
            Err(e) => {
                warn!(error = %e, "Failed to get model defaults");
                state.display = Display::Error(INIT_FAILED.to_string());
                self.emit(PanelUpdate::Error {
                    message: INIT_FAILED.to_string(),
                });
            }
        }
        self.emit(self.controls(&state));
    }

    fn finish_submit(&self, submission: &Submission, result: Result<String, AiError>) {
        let mut state = self.lock();
        state.pending = false;

        if state.epoch != submission.epoch {
            debug!(
                request_id = %submission.request_id,
                ok = result.is_ok(),
                "Discarding reply to a submission made before reset"
            );
        } else {
            match result {
                Ok(text) => {
                    info!(request_id = %submission.request_id, len = text.len(), "Outfit advice received");
                    let segments = render_response(&text);
                    state.display = Display::Response(segments.clone());
                    state.reset_enabled = true;
                    self.emit(PanelUpdate::Response { segments });
                }
                Err(e) => {
                    warn!(request_id = %submission.request_id, error = %e, "Outfit request failed");
                    let message = failure_message(&e);
                    state.display = Display::Error(message.clone());
                    state.reset_enabled = false;
                    self.emit(PanelUpdate::Error { message });
                }
            }
        }
        self.emit(self.controls(&state));
    }

    fn controls(&self, state: &PanelState) -> ControlsState {
        ControlsState {
            submit_enabled: state.submit_enabled(),
            reset_enabled: state.reset_enabled && !state.disabled,
            disabled: state.disabled,
            pending: state.pending,
            weather: state.form.weather.clone(),
            occasion: state.form.occasion.clone(),
            preferences: state.form.preferences.clone(),
            temperature: state.params.temperature,
            top_k: state.params.top_k,
            temperature_label: temperature_label(state.params.temperature),
            top_k_label: state.params.top_k.to_string(),
            weather_options: self.settings.weather_options.clone(),
            occasion_options: self.settings.occasion_options.clone(),
        }
    }

    fn emit(&self, update: impl Into<PanelUpdate>) {
        if self.updates.send(update.into()).is_err() {
            debug!("Panel update receiver dropped");
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Text to show for a failed request: the error's own message, or the
/// generic fallback when that message is blank.
pub fn failure_message(error: &AiError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        GENERATE_FAILED.to_string()
    } else {
        message
    }
}

fn is_allowed(value: &str, options: &[String]) -> bool {
    value.is_empty() || options.iter().any(|option| option == value)
}
