//! # Firestore Client
//!
//! Atomic batch writes through the Firestore v1 `documents:commit` endpoint.
//! A commit applies all of its writes or none of them.

// region: --- Modules
pub mod value;
// endregion: --- Modules

use crate::http::{check_status, transport_error};
use async_trait::async_trait;
use lib_core::{AppError, DocumentStore, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Most writes Firestore accepts in one commit.
pub const MAX_BATCH_WRITES: usize = 500;

#[derive(Debug, Serialize)]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
struct Write {
    update: Document,
}

#[derive(Debug, Serialize)]
struct Document {
    name: String,
    fields: Map<String, Value>,
}

/// HTTP client for the project's `(default)` Firestore database.
#[derive(Clone)]
pub struct FirestoreClient {
    http: Client,
    base_url: String,
    project_id: String,
    bearer_token: String,
}

impl FirestoreClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            bearer_token: bearer_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    /// Full resource name of a document.
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/documents/{}/{}", self.database_path(), collection, id)
    }

    fn commit_url(&self) -> String {
        format!("{}/v1/{}/documents:commit", self.base_url, self.database_path())
    }

    fn commit_request(
        &self,
        collection: &str,
        documents: Vec<(String, Value)>,
    ) -> Result<CommitRequest> {
        let writes = documents
            .into_iter()
            .map(|(id, document)| -> Result<Write> {
                Ok(Write {
                    update: Document {
                        name: self.document_name(collection, &id),
                        fields: value::encode_document(&document)?,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CommitRequest { writes })
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn batch_upsert(&self, collection: &str, documents: Vec<(String, Value)>) -> Result<()> {
        if documents.len() > MAX_BATCH_WRITES {
            return Err(AppError::Provider(format!(
                "batch of {} writes exceeds the {}-write commit limit",
                documents.len(),
                MAX_BATCH_WRITES
            )));
        }

        let request = self.commit_request(collection, documents)?;
        debug!(writes = request.writes.len(), collection, "Committing batch");

        let response = self
            .http
            .post(self.commit_url())
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error("Batch commit", e))?;

        check_status(response).await?;
        Ok(())
    }
}
