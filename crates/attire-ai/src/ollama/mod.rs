//! Ollama backend: on-device inference through a local Ollama server.
//!
//! The chat endpoint is stateless, so a session keeps its own history and
//! replays it, together with the system message, on every prompt.

mod api;
mod client;

pub use client::{OllamaConfig, OllamaService};
