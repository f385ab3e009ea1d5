//! # External Stores
//!
//! Ports to the two Firebase services the tools talk to. Production
//! implementations live in `lib-firebase`; tests use the in-memory doubles.

// region: --- Modules
#[cfg(test)]
pub(crate) mod memory;
// endregion: --- Modules

use crate::error::Result;
use crate::model::PrincipalPage;
use async_trait::async_trait;
use serde_json::Value;

/// The identity service holding the registered accounts.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Fetch the first page of accounts. Continuation tokens are reported but
    /// never followed.
    async fn list_principals(&self) -> Result<PrincipalPage>;

    /// Permanently delete one account.
    async fn delete_principal(&self, uid: &str) -> Result<()>;
}

/// The document database the category taxonomy is written to.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Overwrite every `(id, document)` in `collection` as one atomic batch:
    /// either all documents are written or none are.
    async fn batch_upsert(&self, collection: &str, documents: Vec<(String, Value)>) -> Result<()>;
}
