//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate that a number lies within `min..=max`.
pub fn validate_range(value: u64, min: u64, max: u64, field_name: &str) -> Result<(), String> {
    if value < min || value > max {
        Err(format!("{} must be between {} and {}", field_name, min, max))
    } else {
        Ok(())
    }
}
