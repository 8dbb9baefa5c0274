//! Static panel settings derived from the config file.

use attire_ai::GenerationParams;
use attire_config::AttireConfig;

/// Option lists, input limits and fallback slider values for a [`Panel`].
///
/// [`Panel`]: crate::Panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSettings {
    pub weather_options: Vec<String>,
    pub occasion_options: Vec<String>,
    /// Maximum preferences length, in characters.
    pub max_preferences_len: usize,
    /// Slider values used until (or unless) the service reports its own.
    pub default_params: GenerationParams,
}

impl PanelSettings {
    pub fn from_config(config: &AttireConfig) -> Self {
        Self {
            weather_options: config.panel.weather_options.clone(),
            occasion_options: config.panel.occasion_options.clone(),
            max_preferences_len: config.panel.max_preferences_len,
            default_params: GenerationParams::new(
                config.generation.temperature,
                config.generation.top_k,
            ),
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self::from_config(&AttireConfig::default())
    }
}
