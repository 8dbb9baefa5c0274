//! Typed panel intents and their decoding from IPC messages.

use serde_json::Value;

use crate::ipc::{IpcMessage, IpcPayload};

/// A user action on the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelIntent {
    /// The UI finished loading; query the service for slider defaults.
    Ready,
    /// Weather selection; empty means unset.
    SelectWeather(String),
    /// Occasion selection; empty means unset.
    SelectOccasion(String),
    EditPreferences(String),
    SetTemperature(f64),
    SetTopK(u32),
    Submit,
    Reset,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntentError {
    #[error("unknown message kind: {0}")]
    UnknownKind(String),

    #[error("invalid payload for {kind}: {reason}")]
    BadPayload { kind: String, reason: String },
}

impl PanelIntent {
    /// IPC kind name for this intent.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::SelectWeather(_) => "select_weather",
            Self::SelectOccasion(_) => "select_occasion",
            Self::EditPreferences(_) => "edit_preferences",
            Self::SetTemperature(_) => "set_temperature",
            Self::SetTopK(_) => "set_top_k",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

impl TryFrom<&IpcMessage> for PanelIntent {
    type Error = IntentError;

    fn try_from(msg: &IpcMessage) -> Result<Self, Self::Error> {
        let payload = &msg.payload;
        let bad = |reason: &str| IntentError::BadPayload {
            kind: msg.kind.clone(),
            reason: reason.to_string(),
        };

        match msg.kind.as_str() {
            "ready" => Ok(Self::Ready),
            "submit" => Ok(Self::Submit),
            "reset" => Ok(Self::Reset),
            "select_weather" => string_field(payload, "value")
                .map(Self::SelectWeather)
                .ok_or_else(|| bad("expected a string `value`")),
            "select_occasion" => string_field(payload, "value")
                .map(Self::SelectOccasion)
                .ok_or_else(|| bad("expected a string `value`")),
            "edit_preferences" => string_field(payload, "text")
                .map(Self::EditPreferences)
                .ok_or_else(|| bad("expected a string `text`")),
            "set_temperature" => {
                let value = number_field(payload, "value")
                    .ok_or_else(|| bad("expected a numeric `value`"))?;
                if !value.is_finite() || value < 0.0 {
                    return Err(bad("temperature must be a non-negative number"));
                }
                Ok(Self::SetTemperature(value))
            }
            "set_top_k" => {
                let value = integer_field(payload, "value")
                    .ok_or_else(|| bad("expected a positive integer `value`"))?;
                if value == 0 {
                    return Err(bad("top_k must be at least 1"));
                }
                Ok(Self::SetTopK(value))
            }
            other => Err(IntentError::UnknownKind(other.to_string())),
        }
    }
}

/// The raw value for `key`: either the named field of an object payload or
/// the whole payload when it is a bare value.
fn raw_field<'a>(payload: &'a IpcPayload, key: &str) -> Option<RawValue<'a>> {
    match payload {
        IpcPayload::Text(text) => Some(RawValue::Str(text)),
        IpcPayload::Json(Value::Object(_)) => payload.field(key).map(RawValue::Json),
        IpcPayload::Json(Value::Null) | IpcPayload::None => None,
        IpcPayload::Json(value) => Some(RawValue::Json(value)),
    }
}

#[derive(Clone, Copy)]
enum RawValue<'a> {
    Str(&'a str),
    Json(&'a Value),
}

impl<'a> RawValue<'a> {
    fn as_str(self) -> Option<&'a str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Json(Value::String(s)) => Some(s.as_str()),
            Self::Json(_) => None,
        }
    }
}

fn string_field(payload: &IpcPayload, key: &str) -> Option<String> {
    raw_field(payload, key)?.as_str().map(str::to_string)
}

/// Numbers arrive as JSON numbers or as numeric strings (slider inputs).
fn number_field(payload: &IpcPayload, key: &str) -> Option<f64> {
    match raw_field(payload, key)? {
        RawValue::Json(Value::Number(n)) => n.as_f64(),
        raw => raw.as_str()?.trim().parse().ok(),
    }
}

fn integer_field(payload: &IpcPayload, key: &str) -> Option<u32> {
    match raw_field(payload, key)? {
        RawValue::Json(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        raw => raw.as_str()?.trim().parse().ok(),
    }
}
