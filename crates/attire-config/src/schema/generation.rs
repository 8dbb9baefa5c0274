//! Generation parameter defaults.

use serde::{Deserialize, Serialize};

/// Slider defaults, used until (or instead of, if the query fails) the
/// model service reports its own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Sampling breadth. Valid range: 1-128.
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_k: 3,
        }
    }
}
