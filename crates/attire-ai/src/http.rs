//! HTTP plumbing shared by the Gemini and Ollama backends.

use std::time::Duration;

use crate::AiError;

/// Build a reqwest client with the configured timeouts.
pub(crate) fn build_client(connect_timeout: Duration, request_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// Map a transport-level failure.
pub(crate) fn network_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Network(format!("request timed out: {e}"))
    } else {
        AiError::Network(e.to_string())
    }
}

/// Pass successful responses through; turn HTTP errors into `AiError`s.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AiError::RateLimited);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(AiError::Api(format!("HTTP {status}: {text}")));
    }
    Ok(response)
}

/// Decode a JSON body.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AiError> {
    response
        .json()
        .await
        .map_err(|e| AiError::Parse(e.to_string()))
}
