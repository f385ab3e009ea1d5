//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] shared by both admin tools.
//! It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Startup** - nothing has touched Firebase yet
//!    - [`Initialization`](AppError::Initialization) - missing/invalid config or credentials
//!    - [`Auth`](AppError::Auth) - access token exchange refused
//!
//! 2. **Operation** - raised by a purge or seeding run
//!    - [`Listing`](AppError::Listing) - user listing failed
//!    - [`Deletion`](AppError::Deletion) - one or more user deletions failed
//!    - [`Commit`](AppError::Commit) - the category batch write was rejected
//!    - [`InvalidData`](AppError::InvalidData) - category invariants violated
//!
//! 3. **Plumbing**
//!    - [`Provider`](AppError::Provider) - transport or decoding failure inside a client
//!    - [`Io`](AppError::Io) - writing console output failed
//!
//! Clients report failures as `Provider`; the calling operation reclassifies
//! them into `Listing`, `Deletion` or `Commit` so the caller sees which step failed.

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration or credential problem detected at startup.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// The OAuth token endpoint refused the service account assertion.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Listing users from the identity service failed.
    #[error("Listing error: {0}")]
    Listing(String),

    /// At least one user deletion failed. `uid`/`message` describe the first
    /// failure observed; `failed` of `total` deletions did not succeed.
    #[error("Deletion error: {failed} of {total} deletions failed; first failure for {uid}: {message}")]
    Deletion {
        uid: String,
        message: String,
        failed: usize,
        total: usize,
    },

    /// The atomic batch write was rejected; no document was written.
    #[error("Commit error: {0}")]
    Commit(String),

    /// Category data breaks an invariant (duplicate id or sort order).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Transport, HTTP status or decoding failure reported by a client.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Short variant name, logged as the `code` field when a tool fails.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Initialization(_) => "Initialization",
            AppError::Auth(_) => "Auth",
            AppError::Listing(_) => "Listing",
            AppError::Deletion { .. } => "Deletion",
            AppError::Commit(_) => "Commit",
            AppError::InvalidData(_) => "InvalidData",
            AppError::Provider(_) => "Provider",
            AppError::Io(_) => "Io",
        }
    }

    /// Message without the variant prefix.
    ///
    /// Used when a provider failure is rewrapped by an operation so the
    /// prefix does not repeat.
    pub fn detail(&self) -> String {
        match self {
            AppError::Initialization(msg)
            | AppError::Auth(msg)
            | AppError::Listing(msg)
            | AppError::Commit(msg)
            | AppError::InvalidData(msg)
            | AppError::Provider(msg)
            | AppError::Io(msg) => msg.clone(),
            AppError::Deletion { .. } => self.to_string(),
        }
    }

    /// Code of the first `AppError` in `err`'s source chain, or `"Other"`.
    pub fn code_of(err: &(dyn std::error::Error + 'static)) -> &'static str {
        std::iter::successors(Some(err), |e| e.source())
            .find_map(|e| e.downcast_ref::<AppError>())
            .map_or("Other", |e| e.code())
    }

    /// Rewrap a `Provider` failure with `classify`; other variants pass through.
    pub fn reclassify(self, classify: impl FnOnce(String) -> AppError) -> AppError {
        match self {
            AppError::Provider(msg) => classify(msg),
            other => other,
        }
    }
}

/// Convert credential loading and signing failures to `AppError`.
impl From<lib_auth::AuthError> for AppError {
    fn from(err: lib_auth::AuthError) -> Self {
        AppError::Initialization(err.to_string())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Provider(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
