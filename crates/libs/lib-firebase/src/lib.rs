//! # Firebase REST Clients
//!
//! `reqwest` implementations of the store ports in `lib-core`:
//!
//! - [`IdentityToolkitClient`] - Firebase Authentication user listing and deletion
//! - [`FirestoreClient`] - atomic batch writes to Cloud Firestore
//!
//! Both are handed out by a [`FirebaseContext`], built once at startup from
//! the configuration and service account key.

pub mod context;
pub mod firestore;
pub mod identity;
pub mod oauth;

mod http;

#[cfg(test)]
pub(crate) mod test_server;

// Re-export commonly used types
pub use context::FirebaseContext;
pub use firestore::FirestoreClient;
pub use identity::IdentityToolkitClient;
pub use oauth::fetch_access_token;

/// Production endpoint of the Identity Toolkit API.
pub const IDENTITY_TOOLKIT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Production endpoint of the Firestore API.
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Bearer token both emulators accept with admin privileges.
pub const EMULATOR_BEARER_TOKEN: &str = "owner";
