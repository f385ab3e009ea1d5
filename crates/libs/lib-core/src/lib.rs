//! # Core Library
//!
//! Configuration, errors, domain models and the two admin operations:
//! purging every authentication user and seeding the category taxonomy.

pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod purge;
pub mod seed;

// Re-export commonly used types
pub use config::{Config, Service};
pub use error::{AppError, Result};
pub use model::store::{DocumentStore, IdentityService};
pub use model::{CategoryRecord, CategoryType, Principal, PrincipalPage};
pub use purge::{delete_principals, purge_all_users, PurgeReport};
pub use seed::{
    commit_categories, list_categories, render_categories, seed_categories, validate_categories,
    SeedMode, SeedOutcome,
};
