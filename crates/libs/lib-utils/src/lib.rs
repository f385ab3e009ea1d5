//! # Utilities Library
//!
//! Shared helpers for environment variables, timestamps and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse};
pub use time::{format_iso_millis, now_utc};
pub use validation::{validate_not_empty, validate_range};
