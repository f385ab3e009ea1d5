//! # Authentication Library
//!
//! Google service-account keys and the signed JWT assertions exchanged for
//! OAuth access tokens.

pub mod key;
pub mod token;

// Re-export commonly used types
pub use key::{ServiceAccountKey, DEFAULT_TOKEN_URI};
pub use token::{encode_assertion, AssertionClaims, FIREBASE_SCOPES};

use thiserror::Error;

/// Errors raised while loading keys or signing assertions.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Cannot read service account file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign JWT assertion: {0}")]
    Signing(String),
}
