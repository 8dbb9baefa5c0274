//! One-shot commands: `advise` and `defaults`.

use std::sync::Arc;

use attire_ai::{ModelService, SessionManager};
use attire_common::AttireError;
use attire_panel::{segments_to_text, Display, Panel, PanelIntent, PanelSettings};
use tracing::info;

use crate::cli::AdviseArgs;

/// Run a single recommendation through the panel and return the reply text.
pub async fn advise(
    service: Arc<dyn ModelService>,
    settings: PanelSettings,
    args: &AdviseArgs,
) -> Result<String, AttireError> {
    check_option("weather", &args.weather, &settings.weather_options)?;
    check_option("occasion", &args.occasion, &settings.occasion_options)?;

    let manager = Arc::new(SessionManager::new(service));
    let (panel, _updates) = Panel::new(Arc::clone(&manager), settings);

    panel.dispatch(PanelIntent::Ready).await;
    if panel.controls_state().disabled {
        return Err(AttireError::Ai(error_text(panel.display())));
    }

    panel
        .dispatch(PanelIntent::SelectWeather(args.weather.clone()))
        .await;
    panel
        .dispatch(PanelIntent::SelectOccasion(args.occasion.clone()))
        .await;
    if let Some(preferences) = &args.preferences {
        panel
            .dispatch(PanelIntent::EditPreferences(preferences.clone()))
            .await;
    }
    if let Some(temperature) = args.temperature {
        panel.dispatch(PanelIntent::SetTemperature(temperature)).await;
    }
    if let Some(top_k) = args.top_k {
        panel.dispatch(PanelIntent::SetTopK(top_k)).await;
    }

    let controls = panel.controls_state();
    info!(
        weather = %controls.weather,
        occasion = %controls.occasion,
        temperature = controls.temperature,
        top_k = controls.top_k,
        "Requesting outfit advice"
    );
    panel.dispatch(PanelIntent::Submit).await;

    let result = match panel.display() {
        Display::Response(segments) => Ok(segments_to_text(&segments)),
        other => Err(AttireError::Ai(error_text(other))),
    };
    manager.reset().await;
    result
}

/// Print the service's default generation parameters.
pub async fn defaults(service: Arc<dyn ModelService>) -> Result<String, AttireError> {
    let params = service
        .capabilities()
        .await
        .map_err(|e| AttireError::Ai(e.to_string()))?;
    Ok(format!(
        "backend: {}\ntemperature: {}\ntop_k: {}\n",
        service.name(),
        params.temperature,
        params.top_k
    ))
}

fn check_option(field: &str, value: &str, options: &[String]) -> Result<(), AttireError> {
    if options.iter().any(|option| option == value) {
        return Ok(());
    }
    Err(AttireError::Other(format!(
        "unknown {field} {value:?}; expected one of: {}",
        options.join(", ")
    )))
}

fn error_text(display: Display) -> String {
    match display {
        Display::Error(message) => message,
        _ => "no response".to_string(),
    }
}
