//! # Domain Models
//!
//! Identity principals, category records and the ports to the external stores.

// region: --- Modules
pub mod category;
pub mod principal;
pub mod store;
// endregion: --- Modules

// region: --- Re-exports
pub use category::{CategoryRecord, CategoryType};
pub use principal::{Principal, PrincipalPage};
// endregion: --- Re-exports
