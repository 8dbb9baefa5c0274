//! Generation parameters and session creation requests.

use serde::{Deserialize, Serialize};

use crate::prompt::SYSTEM_INSTRUCTION;

/// Sampling controls fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    /// Sampling breadth: how many candidate tokens are considered per step.
    pub top_k: u32,
}

impl GenerationParams {
    pub fn new(temperature: f64, top_k: u32) -> Self {
        Self { temperature, top_k }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_k: 3,
        }
    }
}

/// Everything a model service needs to open a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub system_instruction: String,
    pub params: GenerationParams,
}

impl SessionConfig {
    /// Session config using the outfit consultant system instruction.
    pub fn new(params: GenerationParams) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            params,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_defaults_to_consultant_instruction() {
        let config = SessionConfig::new(GenerationParams::new(0.5, 10));
        assert_eq!(config.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(config.params.top_k, 10);
    }

    #[test]
    fn params_compare_by_both_fields() {
        let base = GenerationParams::new(0.7, 5);
        assert_eq!(base, GenerationParams::new(0.7, 5));
        assert_ne!(base, GenerationParams::new(0.8, 5));
        assert_ne!(base, GenerationParams::new(0.7, 6));
    }
}
