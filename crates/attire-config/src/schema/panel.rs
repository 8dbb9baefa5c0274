//! Panel form configuration.

use serde::{Deserialize, Serialize};

/// Choices offered by the panel form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub weather_options: Vec<String>,
    pub occasion_options: Vec<String>,
    /// Maximum accepted length of the preferences text, in characters.
    pub max_preferences_len: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            weather_options: to_strings(&[
                "Sunny", "Cloudy", "Rainy", "Snowy", "Windy", "Hot", "Cold",
            ]),
            occasion_options: to_strings(&[
                "Casual",
                "Business Meeting",
                "Formal Event",
                "Date Night",
                "Workout",
                "Outdoor Activity",
                "Party",
            ]),
            max_preferences_len: 4096,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
