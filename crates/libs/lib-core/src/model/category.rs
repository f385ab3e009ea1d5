use serde::{Deserialize, Serialize};
use std::fmt;

/// What a category classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Event,
    Task,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Event => "event",
            CategoryType::Task => "task",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A taxonomy entry stored as one Firestore document.
///
/// `id` doubles as the document key. Serialized with the camelCase field
/// names the app reads (`displayName`, `sortOrder`, `isActive`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    /// Localized label shown in the app
    pub display_name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// Display position within `category_type`
    pub sort_order: i64,
    pub is_active: bool,
    /// ISO-8601, e.g. `2026-10-16T08:00:00.000Z`
    pub created_at: String,
    pub updated_at: String,
}
