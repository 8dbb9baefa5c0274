//! Outfit panel controller and its IPC protocol.
//!
//! Provides:
//! - `Panel`, a state machine driven by typed `PanelIntent`s
//! - The JSON message shapes exchanged with a panel UI
//! - Response rendering into display segments

pub mod controller;
pub mod intent;
pub mod ipc;
pub mod settings;
pub mod view;

pub use controller::{Effect, Panel, Submission};
pub use intent::{IntentError, PanelIntent};
pub use ipc::{IpcMessage, IpcPayload, PanelUpdate};
pub use settings::PanelSettings;
pub use view::{render_response, segments_to_text, ControlsState, Display, ResponseSegment};
