//! # OAuth Access Tokens
//!
//! Exchanges a signed service account assertion for a bearer token
//! (JWT bearer grant, RFC 7523). Tokens last an hour, far longer than any
//! run of the admin tools, so they are fetched once and never refreshed.

use crate::http::{decode_error, transport_error};
use lib_auth::{encode_assertion, ServiceAccountKey, FIREBASE_SCOPES};
use lib_core::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Fetch an access token for `key` from its token endpoint.
pub async fn fetch_access_token(http: &Client, key: &ServiceAccountKey) -> Result<String> {
    let assertion = encode_assertion(key, FIREBASE_SCOPES)?;

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await
        .map_err(|e| transport_error("Token", e).reclassify(AppError::Auth))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(TokenErrorResponse { error, error_description: Some(description) }) => {
                format!("{}: {}", error, description)
            }
            Ok(TokenErrorResponse { error, .. }) => error,
            Err(_) => body.trim().to_string(),
        };
        return Err(AppError::Auth(format!(
            "token endpoint returned HTTP {}: {}",
            status.as_u16(),
            reason
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| decode_error("Token", e).reclassify(AppError::Auth))?;

    debug!(
        client_email = %key.client_email,
        expires_in = token.expires_in.unwrap_or_default(),
        "Access token acquired"
    );
    Ok(token.access_token)
}
