//! Validation Support
//!
//! Stateless precondition checks used by the query generators before any SQL
//! is assembled. Every check returns `Ok(())` on success or the first
//! `ValidationError` it meets; there is no aggregation of failures.
//!
//! # Example
//!
//! ```rust
//! use jpapi::params::ParameterSet;
//! use jpapi::validation::validators::{require_length, require_params};
//!
//! let params = ParameterSet::from_pairs([("id", "USA")]);
//! assert!(require_params(&params, &["id"]).is_ok());
//! assert!(require_length("id", "USA", 2).is_err());
//! ```

use serde::Serialize;
use std::fmt;

/// Validation error with the offending parameter and a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The parameter (or column) that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validators for the shapes the query generators accept
pub mod validators {
    use super::ValidationError;
    use crate::params::ParameterSet;

    /// Every key must be present and non-empty.
    pub fn require_params(params: &ParameterSet, keys: &[&str]) -> Result<(), ValidationError> {
        for key in keys {
            if !params.has(key) {
                return Err(ValidationError::new(
                    *key,
                    "You are missing a required parameter",
                ));
            }
        }
        Ok(())
    }

    /// Value must be exactly `length` characters long.
    pub fn require_length(field: &str, value: &str, length: usize) -> Result<(), ValidationError> {
        if value.chars().count() != length {
            return Err(ValidationError::new(
                field,
                format!("Must be exactly {length} characters"),
            ));
        }
        Ok(())
    }

    /// Every `|` separated part must be exactly `length` characters long.
    pub fn require_length_for_each_delimited(
        field: &str,
        value: &str,
        length: usize,
    ) -> Result<(), ValidationError> {
        value
            .split('|')
            .try_for_each(|part| require_length(field, part, length))
    }

    /// Parse a base-10 integer.
    pub fn require_integer(field: &str, value: &str) -> Result<i64, ValidationError> {
        value
            .parse::<i64>()
            .map_err(|_| ValidationError::new(field, format!("'{value}' is not a whole number")))
    }

    /// `min <= value <= max`, and `value` is not one of `exceptions`.
    pub fn require_in_range(
        field: &str,
        value: i64,
        min: i64,
        max: i64,
        exceptions: &[i64],
    ) -> Result<(), ValidationError> {
        if value < min || value > max {
            return Err(ValidationError::new(
                field,
                format!("Must be between {min} and {max}"),
            ));
        }
        if exceptions.contains(&value) {
            return Err(ValidationError::new(
                field,
                format!("{value} is not an accepted value"),
            ));
        }
        Ok(())
    }

    /// Every `|` separated part, lower-cased, must be in `allowed`.
    pub fn require_membership(
        field: &str,
        value: &str,
        allowed: &[&str],
    ) -> Result<(), ValidationError> {
        for part in value.split('|') {
            let lowered = part.to_lowercase();
            if !allowed.contains(&lowered.as_str()) {
                return Err(ValidationError::new(
                    field,
                    format!("'{part}' is not an accepted value"),
                ));
            }
        }
        Ok(())
    }
}
