//! Google Gemini backend.
//!
//! Implements `ModelService` over the Generative Language API. Gemini has
//! no server-side session, so a session is the system instruction, the
//! generation parameters and the conversation history kept locally.

mod api;
mod client;
mod config;

pub use client::GeminiService;
pub use config::GeminiConfig;
