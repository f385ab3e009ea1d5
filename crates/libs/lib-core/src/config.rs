//! # Application Configuration
//!
//! Configuration loaded from environment variables (after `.env` via `dotenvy`)
//! and validated on startup to fail fast if misconfigured.
//!
//! The config is built once in `main` and handed to the Firebase context
//! explicitly; there is no global instance.

use crate::error::{AppError, Result};
use lib_utils::envs::Error as EnvError;
use lib_utils::{get_env_opt, get_env_or, get_env_parse, validate_not_empty, validate_range};
use std::path::PathBuf;

/// Key file looked up when `GOOGLE_APPLICATION_CREDENTIALS` is unset.
pub const DEFAULT_CREDENTIALS_PATH: &str = "./firebase-admin-key.json";

/// Firestore collection holding the category taxonomy.
pub const DEFAULT_CATEGORIES_COLLECTION: &str = "categories";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Firebase services the tools talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Firebase Authentication (Identity Toolkit API)
    Auth,
    /// Cloud Firestore
    Firestore,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Auth => "auth",
            Service::Firestore => "firestore",
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the service account key JSON file
    pub credentials_path: PathBuf,

    /// Project override; defaults to the key file's `project_id`
    pub project_id: Option<String>,

    /// `host:port` of the Authentication emulator, if one is used
    pub auth_emulator_host: Option<String>,

    /// `host:port` of the Firestore emulator, if one is used
    pub firestore_emulator_host: Option<String>,

    /// Collection the category documents are written to
    pub categories_collection: String,

    /// Per-request HTTP timeout in seconds
    ///
    /// Valid range: 1-600
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            project_id: None,
            auth_emulator_host: None,
            firestore_emulator_host: None,
            categories_collection: DEFAULT_CATEGORIES_COLLECTION.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let credentials_path = PathBuf::from(get_env_or(
            "GOOGLE_APPLICATION_CREDENTIALS",
            DEFAULT_CREDENTIALS_PATH,
        ));

        let project_id =
            get_env_opt("FIREBASE_PROJECT_ID").or_else(|| get_env_opt("GCLOUD_PROJECT"));

        let http_timeout_secs = match get_env_parse::<u64>("HTTP_TIMEOUT_SECS") {
            Ok(secs) => secs,
            Err(EnvError::MissingEnv(_)) => DEFAULT_HTTP_TIMEOUT_SECS,
            Err(e) => return Err(AppError::Initialization(e.to_string())),
        };

        Ok(Self {
            credentials_path,
            project_id,
            auth_emulator_host: get_env_opt("FIREBASE_AUTH_EMULATOR_HOST"),
            firestore_emulator_host: get_env_opt("FIRESTORE_EMULATOR_HOST"),
            categories_collection: get_env_or(
                "CATEGORIES_COLLECTION",
                DEFAULT_CATEGORIES_COLLECTION,
            ),
            http_timeout_secs,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_collection_id(&self.categories_collection)?;

        if let Some(project_id) = &self.project_id {
            validate_not_empty(project_id, "FIREBASE_PROJECT_ID")
                .map_err(AppError::Initialization)?;
        }

        validate_range(self.http_timeout_secs, 1, 600, "HTTP_TIMEOUT_SECS")
            .map_err(AppError::Initialization)?;

        Ok(())
    }

    /// Override the credential path (e.g. from a CLI flag).
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    /// Override the target collection (e.g. from a CLI flag).
    pub fn with_categories_collection(mut self, collection: impl Into<String>) -> Self {
        self.categories_collection = collection.into();
        self
    }

    /// Emulator `host:port` configured for `service`.
    pub fn emulator_host(&self, service: Service) -> Option<&str> {
        match service {
            Service::Auth => self.auth_emulator_host.as_deref(),
            Service::Firestore => self.firestore_emulator_host.as_deref(),
        }
    }

    /// Whether a service account key is needed to reach every service in `services`.
    pub fn requires_credentials(&self, services: &[Service]) -> bool {
        services.iter().any(|s| self.emulator_host(*s).is_none())
    }
}

/// Check that `collection` names a top-level collection.
pub fn validate_collection_id(collection: &str) -> Result<()> {
    validate_not_empty(collection, "CATEGORIES_COLLECTION").map_err(AppError::Initialization)?;

    if collection.contains('/') {
        return Err(AppError::Initialization(
            "CATEGORIES_COLLECTION must be a top-level collection id without '/'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.credentials_path, PathBuf::from(DEFAULT_CREDENTIALS_PATH));
        assert_eq!(config.categories_collection, "categories");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let nested = Config::default().with_categories_collection("app/categories");
        assert!(matches!(nested.validate(), Err(AppError::Initialization(_))));

        let empty = Config::default().with_categories_collection(" ");
        assert!(empty.validate().is_err());

        let slow = Config {
            http_timeout_secs: 0,
            ..Default::default()
        };
        assert!(slow.validate().is_err());
    }

    #[test]
    fn test_validate_collection_id() {
        assert!(validate_collection_id("categories").is_ok());
        assert!(matches!(validate_collection_id(""), Err(AppError::Initialization(_))));
        assert!(validate_collection_id("app/categories").is_err());
    }

    #[test]
    fn test_from_env_timeout() {
        // Only test in this crate that touches HTTP_TIMEOUT_SECS.
        std::env::set_var("HTTP_TIMEOUT_SECS", " 45 ");
        assert_eq!(Config::from_env().unwrap().http_timeout_secs, 45);

        std::env::set_var("HTTP_TIMEOUT_SECS", "soon");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, AppError::Initialization(ref m) if m.contains("HTTP_TIMEOUT_SECS")));

        std::env::remove_var("HTTP_TIMEOUT_SECS");
        assert_eq!(Config::from_env().unwrap().http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_requires_credentials_unless_all_emulated() {
        let config = Config {
            auth_emulator_host: Some("127.0.0.1:9099".to_string()),
            ..Default::default()
        };

        assert!(!config.requires_credentials(&[Service::Auth]));
        assert!(config.requires_credentials(&[Service::Firestore]));
        assert!(config.requires_credentials(&[Service::Auth, Service::Firestore]));
        assert_eq!(config.emulator_host(Service::Auth), Some("127.0.0.1:9099"));
    }
}
