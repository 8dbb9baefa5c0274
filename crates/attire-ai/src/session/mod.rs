//! Session lifecycle.
//!
//! `SessionManager` owns at most one live model session. It creates the
//! session lazily on the first prompt, keeps it while the generation
//! parameters stay the same, and tears it down on reset or failure.

mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use manager::SessionManager;
pub use types::SessionState;
