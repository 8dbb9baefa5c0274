//! IPC protocol between the panel UI and the controller.
//!
//! Messages are JSON objects of the form `{"kind": ..., "payload": ...}`:
//! - **UI -> Rust**: [`IpcMessage`], parsed into a `PanelIntent`.
//! - **Rust -> UI**: [`PanelUpdate`], one per view change.

use serde::{Deserialize, Serialize};

use crate::view::{ControlsState, ResponseSegment};

/// A raw IPC message from the panel UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload. Absent for bare commands like `submit`.
    #[serde(default)]
    pub payload: IpcPayload,
}

/// Payload of an IPC message: a bare string or structured JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    #[default]
    None,
}

impl IpcPayload {
    /// Look up `key` in a JSON object payload.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => value.get(key),
            _ => None,
        }
    }
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Create a bare command.
    pub fn command(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::None,
        }
    }

    /// Create a JSON message.
    pub fn json(kind: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
        }
    }
}

/// A view change pushed to the panel UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum PanelUpdate {
    /// Full control state: form values, slider labels and button gating.
    Controls(ControlsState),
    /// Show the loading indicator; hides response and error.
    Loading,
    /// Show a rendered response; hides loading and error.
    Response { segments: Vec<ResponseSegment> },
    /// Show an error message; hides loading and response.
    Error { message: String },
    /// Hide every display region.
    Cleared,
}

impl From<ControlsState> for PanelUpdate {
    fn from(controls: ControlsState) -> Self {
        Self::Controls(controls)
    }
}

impl PanelUpdate {
    /// Serialize as a single JSON line for a line-oriented transport.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"kind":"cleared"}"#.to_string())
    }
}
