//! # Firebase Context
//!
//! Everything the clients share, built once in `main` and passed down
//! explicitly: validated config, one HTTP connection pool, the resolved
//! project id and the access token.
//!
//! ```rust,no_run
//! # async fn example() -> lib_core::Result<()> {
//! use lib_core::{purge_all_users, Config, Service};
//! use lib_firebase::FirebaseContext;
//!
//! let ctx = FirebaseContext::connect(Config::from_env()?, &[Service::Auth]).await?;
//! let report = purge_all_users(&ctx.identity()?).await?;
//! println!("Deleted {} user(s)", report.deleted_count);
//! # Ok(())
//! # }
//! ```

use crate::{
    fetch_access_token, FirestoreClient, IdentityToolkitClient, EMULATOR_BEARER_TOKEN,
    FIRESTORE_BASE_URL, IDENTITY_TOOLKIT_BASE_URL,
};
use lib_auth::ServiceAccountKey;
use lib_core::{AppError, Config, Result, Service};
use reqwest::Client;
use std::time::Duration;
use tracing::info;

/// Shared state for talking to one Firebase project.
pub struct FirebaseContext {
    config: Config,
    http: Client,
    project_id: String,
    services: Vec<Service>,
    /// `None` when every requested service runs on an emulator.
    access_token: Option<String>,
}

impl FirebaseContext {
    /// Validate `config`, load credentials and obtain an access token for
    /// `services`.
    ///
    /// # Errors
    ///
    /// Fails before touching any Firebase data if:
    /// - Configuration validation fails
    /// - The service account key is missing or invalid
    /// - The token endpoint rejects the key
    pub async fn connect(config: Config, services: &[Service]) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;

        let (project_id, access_token) = if config.requires_credentials(services) {
            info!("Loading service account key from {}", config.credentials_path.display());
            let key = ServiceAccountKey::from_file(&config.credentials_path)?;
            let project_id = config.project_id.clone().unwrap_or_else(|| key.project_id.clone());

            info!("Requesting access token for {}", key.client_email);
            let token = fetch_access_token(&http, &key).await?;
            (project_id, Some(token))
        } else {
            let project_id = config.project_id.clone().ok_or_else(|| {
                AppError::Initialization(
                    "FIREBASE_PROJECT_ID must be set when only emulators are used".to_string(),
                )
            })?;
            info!("Using emulators only; no credentials loaded");
            (project_id, None)
        };

        info!("Firebase project: {}", project_id);
        Ok(Self {
            config,
            http,
            project_id,
            services: services.to_vec(),
            access_token,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Client for Firebase Authentication user management.
    pub fn identity(&self) -> Result<IdentityToolkitClient> {
        let (base_url, token) = self.endpoint(Service::Auth)?;
        Ok(IdentityToolkitClient::new(self.http.clone(), base_url, &self.project_id, token))
    }

    /// Client for the project's Firestore database.
    pub fn firestore(&self) -> Result<FirestoreClient> {
        let (base_url, token) = self.endpoint(Service::Firestore)?;
        Ok(FirestoreClient::new(self.http.clone(), base_url, &self.project_id, token))
    }

    /// Base URL and bearer token for `service`.
    fn endpoint(&self, service: Service) -> Result<(String, String)> {
        if !self.services.contains(&service) {
            return Err(AppError::Initialization(format!(
                "context was not connected for {}",
                service.as_str()
            )));
        }

        if let Some(host) = self.config.emulator_host(service) {
            let base_url = match service {
                Service::Auth => format!("http://{}/identitytoolkit.googleapis.com", host),
                Service::Firestore => format!("http://{}", host),
            };
            return Ok((base_url, EMULATOR_BEARER_TOKEN.to_string()));
        }

        let base_url = match service {
            Service::Auth => IDENTITY_TOOLKIT_BASE_URL,
            Service::Firestore => FIRESTORE_BASE_URL,
        };
        let token = self.access_token.clone().ok_or_else(|| {
            AppError::Initialization(format!("no access token for {}", service.as_str()))
        })?;
        Ok((base_url.to_string(), token))
    }
}
