//! In-memory doubles for the store ports.

use super::{DocumentStore, IdentityService};
use crate::error::{AppError, Result};
use crate::model::{Principal, PrincipalPage};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Identity service that records every delete call.
#[derive(Default)]
pub struct MemoryIdentityService {
    principals: Vec<Principal>,
    next_page_token: Option<String>,
    list_error: Option<String>,
    failing_uids: HashSet<String>,
    deleted: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryIdentityService {
    pub fn with_principals(principals: Vec<Principal>) -> Self {
        Self {
            principals,
            ..Default::default()
        }
    }

    pub fn truncated(mut self, token: &str) -> Self {
        self.next_page_token = Some(token.to_string());
        self
    }

    pub fn failing_listing(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    pub fn failing_delete(mut self, uid: &str) -> Self {
        self.failing_uids.insert(uid.to_string());
        self
    }

    /// Highest number of deletes observed in progress at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Every uid a delete was attempted for, in call order.
    pub fn delete_calls(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityService for MemoryIdentityService {
    async fn list_principals(&self) -> Result<PrincipalPage> {
        if let Some(message) = &self.list_error {
            return Err(AppError::Provider(message.clone()));
        }
        Ok(PrincipalPage {
            principals: self.principals.clone(),
            next_page_token: self.next_page_token.clone(),
        })
    }

    async fn delete_principal(&self, uid: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(uid.to_string());
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        // Let sibling deletes start before this one settles.
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_uids.contains(uid) {
            return Err(AppError::Provider(format!("USER_NOT_FOUND: {}", uid)));
        }
        Ok(())
    }
}

/// Document store that stages a batch and applies it only when every write
/// in it succeeds.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<BTreeMap<String, Value>>,
    fail_on_write: Option<usize>,
    batch_calls: AtomicUsize,
}

impl MemoryDocumentStore {
    /// Reject the batch when staging its `nth` write (1-based).
    pub fn failing_on_write(nth: usize) -> Self {
        Self {
            fail_on_write: Some(nth),
            ..Default::default()
        }
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.documents
            .lock()
            .unwrap()
            .get(&format!("{}/{}", collection, id))
            .cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn batch_upsert(&self, collection: &str, documents: Vec<(String, Value)>) -> Result<()> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);

        let mut staged = Vec::with_capacity(documents.len());
        for (index, (id, document)) in documents.into_iter().enumerate() {
            if self.fail_on_write == Some(index + 1) {
                return Err(AppError::Provider(format!(
                    "simulated failure on write {} ({})",
                    index + 1,
                    id
                )));
            }
            staged.push((format!("{}/{}", collection, id), document));
        }

        self.documents.lock().unwrap().extend(staged);
        Ok(())
    }
}
