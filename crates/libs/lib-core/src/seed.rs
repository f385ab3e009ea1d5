//! # Category Seeding
//!
//! The fixed category taxonomy and the two ways of getting it into Firestore:
//!
//! - **Dry run** (default): print every document so it can be created by hand
//!   in the Firebase console. Nothing is written.
//! - **Commit**: write all documents as one atomic batch, overwriting any
//!   existing document with the same id.

use crate::error::{AppError, Result};
use crate::model::store::DocumentStore;
use crate::model::{CategoryRecord, CategoryType};
use chrono::{DateTime, Utc};
use lib_utils::format_iso_millis;
use std::collections::HashSet;
use std::io::Write;
use tracing::info;

struct CategoryDefinition {
    id: &'static str,
    display_name: &'static str,
    category_type: CategoryType,
    sort_order: i64,
}

const CATEGORIES: [CategoryDefinition; 8] = [
    // Event categories
    CategoryDefinition {
        id: "EventCategory_language_teaching",
        display_name: "語言教學",
        category_type: CategoryType::Event,
        sort_order: 1,
    },
    CategoryDefinition {
        id: "EventCategory_skill_experience",
        display_name: "技能體驗",
        category_type: CategoryType::Event,
        sort_order: 2,
    },
    CategoryDefinition {
        id: "EventCategory_event_support",
        display_name: "活動支援",
        category_type: CategoryType::Event,
        sort_order: 3,
    },
    CategoryDefinition {
        id: "EventCategory_life_service",
        display_name: "生活服務",
        category_type: CategoryType::Event,
        sort_order: 4,
    },
    // Task categories
    CategoryDefinition {
        id: "TaskCategory_event_support",
        display_name: "活動支援",
        category_type: CategoryType::Task,
        sort_order: 1,
    },
    CategoryDefinition {
        id: "TaskCategory_life_service",
        display_name: "生活服務",
        category_type: CategoryType::Task,
        sort_order: 2,
    },
    CategoryDefinition {
        id: "TaskCategory_skill_sharing",
        display_name: "技能分享",
        category_type: CategoryType::Task,
        sort_order: 3,
    },
    CategoryDefinition {
        id: "TaskCategory_creative_work",
        display_name: "創意工作",
        category_type: CategoryType::Task,
        sort_order: 4,
    },
];

/// How a seeding run delivers the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    #[default]
    DryRun,
    Commit,
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Documents printed, none written.
    Rendered(usize),
    /// Documents written in one batch.
    Committed(usize),
}

/// The category taxonomy in declaration order, stamped with `now`.
///
/// Every record gets `now` as both `createdAt` and `updatedAt`.
pub fn list_categories(now: DateTime<Utc>) -> Vec<CategoryRecord> {
    let timestamp = format_iso_millis(now);

    CATEGORIES
        .iter()
        .map(|def| CategoryRecord {
            id: def.id.to_string(),
            name: def.id.to_string(),
            display_name: def.display_name.to_string(),
            category_type: def.category_type,
            sort_order: def.sort_order,
            is_active: true,
            created_at: timestamp.clone(),
            updated_at: timestamp.clone(),
        })
        .collect()
}

/// Check that ids are unique and sort orders are unique within each type.
pub fn validate_categories(records: &[CategoryRecord]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut positions = HashSet::new();

    for record in records {
        if !ids.insert(record.id.as_str()) {
            return Err(AppError::InvalidData(format!("duplicate category id {}", record.id)));
        }
        if !positions.insert((record.category_type, record.sort_order)) {
            return Err(AppError::InvalidData(format!(
                "sortOrder {} used twice for type {}",
                record.sort_order, record.category_type
            )));
        }
    }

    Ok(())
}

/// Write a copy-paste friendly listing of `records` to `out`.
pub fn render_categories<W: Write>(
    out: &mut W,
    collection: &str,
    records: &[CategoryRecord],
) -> Result<usize> {
    writeln!(
        out,
        "Create the \"{}\" collection in the Firestore console and add the following documents:",
        collection
    )?;

    for record in records {
        writeln!(out, "Document ID: {}", record.id)?;
        writeln!(out, "Data: {}", serde_json::to_string_pretty(record)?)?;
        writeln!(out, "---")?;
    }

    Ok(records.len())
}

/// Write `records` to `collection` as a single atomic batch.
///
/// The document id is the record id and the body is the full record.
pub async fn commit_categories<S>(
    store: &S,
    collection: &str,
    records: &[CategoryRecord],
) -> Result<usize>
where
    S: DocumentStore + ?Sized,
{
    let documents = records
        .iter()
        .map(|record| -> Result<(String, serde_json::Value)> {
            Ok((record.id.clone(), serde_json::to_value(record)?))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Committing {} category document(s) to '{}'", documents.len(), collection);
    store
        .batch_upsert(collection, documents)
        .await
        .map_err(|e| e.reclassify(AppError::Commit))?;

    info!("Category data initialized");
    Ok(records.len())
}

/// Run one seeding pass in `mode`.
///
/// A dry run only writes to `out` and never touches `store`; a commit needs
/// a store.
pub async fn seed_categories<S, W>(
    mode: SeedMode,
    store: Option<&S>,
    out: &mut W,
    collection: &str,
    records: &[CategoryRecord],
) -> Result<SeedOutcome>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    validate_categories(records)?;

    match mode {
        SeedMode::DryRun => render_categories(out, collection, records).map(SeedOutcome::Rendered),
        SeedMode::Commit => {
            let store = store.ok_or_else(|| {
                AppError::Initialization("commit mode requires a document store".to_string())
            })?;
            let written = commit_categories(store, collection, records).await?;
            writeln!(out, "Wrote {} document(s) to \"{}\"", written, collection)?;
            Ok(SeedOutcome::Committed(written))
        }
    }
}
