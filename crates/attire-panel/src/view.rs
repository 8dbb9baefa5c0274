//! View model: display regions, control state and response rendering.

use serde::Serialize;

/// One piece of a rendered response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum ResponseSegment {
    Text(String),
    LineBreak,
}

/// The visible display region. Loading, response and error are mutually
/// exclusive.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Display {
    #[default]
    Hidden,
    Loading,
    Response(Vec<ResponseSegment>),
    Error(String),
}

/// Snapshot of every control the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsState {
    pub submit_enabled: bool,
    pub reset_enabled: bool,
    /// Set when no model is usable; every control is inert.
    pub disabled: bool,
    pub pending: bool,
    pub weather: String,
    pub occasion: String,
    pub preferences: String,
    pub temperature: f64,
    pub top_k: u32,
    pub temperature_label: String,
    pub top_k_label: String,
    pub weather_options: Vec<String>,
    pub occasion_options: Vec<String>,
}

/// Split a model reply into display segments.
///
/// Lines are split on `\n` or `\r\n`. Non-empty lines become text, and every
/// line (empty or not) is followed by a line break.
pub fn render_response(text: &str) -> Vec<ResponseSegment> {
    let mut segments = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            segments.push(ResponseSegment::Text(line.to_string()));
        }
        segments.push(ResponseSegment::LineBreak);
    }
    segments
}

/// Flatten segments back into plain text for terminal output.
pub fn segments_to_text(segments: &[ResponseSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            ResponseSegment::Text(text) => out.push_str(text),
            ResponseSegment::LineBreak => out.push('\n'),
        }
    }
    out
}

/// Slider label for a temperature value, `1` rather than `1.0`.
pub fn temperature_label(temperature: f64) -> String {
    format!("{temperature}")
}
