//! Field checks shared by the input models.

use crate::errors::{Result, ValidationError};

/// Rejects empty or whitespace-only values.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(())
}

/// Rejects values longer than `max` characters (not bytes).
pub fn require_max_len(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max }.into());
    }
    Ok(())
}
