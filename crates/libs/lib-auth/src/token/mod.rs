//! # JWT Assertion
//!
//! RS256-signed JWT assertions for the OAuth 2.0 JWT bearer grant. The token
//! endpoint trades an assertion for a short-lived access token.

use crate::{AuthError, ServiceAccountKey};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Scopes covering the Identity Toolkit and Firestore APIs.
pub const FIREBASE_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/datastore",
    "https://www.googleapis.com/auth/identitytoolkit",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Maximum assertion lifetime accepted by Google's token endpoint.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of a service account assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer (service account email)
    pub iss: String,
    /// Space separated OAuth scopes
    pub scope: String,
    /// Audience (token endpoint)
    pub aud: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Sign an assertion for `scopes` with the key's private key.
pub fn encode_assertion(key: &ServiceAccountKey, scopes: &[&str]) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ASSERTION_LIFETIME_SECS);

    let claims = AssertionClaims {
        iss: key.client_email.clone(),
        scope: scopes.join(" "),
        aud: key.token_uri.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| AuthError::InvalidKey(format!("private_key: {}", e)))?;

    encode(&header, &claims, &encoding_key).map_err(|e| AuthError::Signing(e.to_string()))
}
