//! # User Purge
//!
//! Deletes every account registered in the identity service.
//!
//! **WARNING**: deletion is permanent and not transactional. When one delete
//! fails, accounts removed by its siblings stay removed.
//!
//! All deletes are started together on the current task and the run waits
//! for every one of them to settle before reporting. There is no rate
//! limiting, batching or retry.

use crate::error::{AppError, Result};
use crate::model::store::IdentityService;
use crate::model::Principal;
use futures_util::future::join_all;
use tracing::{info, warn};

/// Outcome of a successful purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    /// Accounts listed, and therefore deleted.
    pub deleted_count: usize,
}

/// List every account and delete it.
///
/// Only the first page of the listing is used; a truncated listing is logged
/// and the remaining accounts are left for another run.
pub async fn purge_all_users<S>(identity: &S) -> Result<PurgeReport>
where
    S: IdentityService + ?Sized,
{
    info!("Listing Firebase Authentication users...");
    let page = identity
        .list_principals()
        .await
        .map_err(|e| e.reclassify(AppError::Listing))?;

    info!("Found {} user(s)", page.principals.len());
    if page.is_truncated() {
        warn!(
            "User listing was truncated after {} user(s); run again to delete the rest",
            page.principals.len()
        );
    }

    delete_principals(identity, &page.principals).await
}

/// Delete `principals` concurrently and wait for all deletes to settle.
///
/// Fails with [`AppError::Deletion`] when any delete failed, naming the first
/// failure in listing order.
pub async fn delete_principals<S>(identity: &S, principals: &[Principal]) -> Result<PurgeReport>
where
    S: IdentityService + ?Sized,
{
    if principals.is_empty() {
        info!("No users to delete");
        return Ok(PurgeReport { deleted_count: 0 });
    }

    let total = principals.len();
    let outcomes = join_all(principals.iter().map(|principal| async move {
        info!(
            uid = %principal.uid,
            email = principal.email_or_placeholder(),
            "Deleting user"
        );
        let outcome = identity.delete_principal(&principal.uid).await;
        (principal, outcome)
    }))
    .await;

    let failures: Vec<(&Principal, AppError)> = outcomes
        .into_iter()
        .filter_map(|(principal, outcome)| outcome.err().map(|e| (principal, e)))
        .collect();

    if let Some((first, first_err)) = failures.first() {
        for (principal, err) in &failures {
            warn!(uid = %principal.uid, error = %err, "Failed to delete user");
        }
        return Err(AppError::Deletion {
            uid: first.uid.clone(),
            message: first_err.detail(),
            failed: failures.len(),
            total,
        });
    }

    info!("Deleted {} user(s)", total);
    Ok(PurgeReport { deleted_count: total })
}
