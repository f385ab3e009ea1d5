//! Response checking shared by the clients.

use lib_core::{AppError, Result};
use reqwest::Response;
use serde::Deserialize;

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    message: Option<String>,
    status: Option<String>,
}

/// Pass successful responses through; turn anything else into a
/// `Provider` error carrying the status and Google's error message.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Provider(format!(
        "HTTP {}: {}",
        status.as_u16(),
        error_message(&body)
    )))
}

/// Map a request that never got a response.
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> AppError {
    AppError::Provider(format!("{} request failed: {}", context, err))
}

/// Map a response body that could not be decoded.
pub(crate) fn decode_error(context: &str, err: reqwest::Error) -> AppError {
    AppError::Provider(format!("{} response parse failed: {}", context, err))
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(GoogleErrorBody { error }) => match (error.status, error.message) {
            (Some(status), Some(message)) if status != message => {
                format!("{} ({})", message, status)
            }
            (_, Some(message)) => message,
            (Some(status), None) => status,
            (None, None) => body.trim().to_string(),
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
