//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::constants::MSG_FIELDS_REQUIRED;

/// Per-field breakdown of which required inputs were missing.
///
/// Every checked field is listed; `true` means it was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingFields {
    #[serde(skip)]
    message: String,
    #[serde(flatten)]
    fields: BTreeMap<&'static str, bool>,
}

impl MissingFields {
    /// Start a breakdown with the default "all fields are required" message.
    pub fn new() -> Self {
        Self::with_message(MSG_FIELDS_REQUIRED)
    }

    /// Start a breakdown with a custom summary message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Record whether `field` was missing.
    pub fn record(mut self, field: &'static str, missing: bool) -> Self {
        self.fields.insert(field, missing);
        self
    }

    /// True when at least one checked field was missing.
    pub fn any(&self) -> bool {
        self.fields.values().any(|missing| *missing)
    }

    /// Whether `field` was recorded as missing.
    pub fn is_missing(&self, field: &str) -> bool {
        self.fields.get(field).copied().unwrap_or(false)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Fail with this breakdown if anything was missing.
    pub fn into_result(self) -> DomainResult<()> {
        if self.any() {
            Err(DomainError::MissingFields(self))
        } else {
            Ok(())
        }
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),

    /// One or more required fields were not supplied
    #[error("{}", .0.message())]
    MissingFields(MissingFields),

    /// Password policy violations
    #[error("{0}")]
    Password(String),

    /// Internal domain error (hashing failures)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_serializes_flat() {
        let missing = MissingFields::new()
            .record("name", false)
            .record("email", true);

        let json = serde_json::to_value(&missing).unwrap();
        assert_eq!(json, serde_json::json!({ "name": false, "email": true }));
    }

    #[test]
    fn test_missing_fields_passes_when_complete() {
        let missing = MissingFields::new().record("name", false);
        assert!(!missing.any());
        assert!(missing.into_result().is_ok());
    }

    #[test]
    fn test_missing_fields_error_uses_summary_message() {
        let err = MissingFields::new()
            .record("email", true)
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_FIELDS_REQUIRED);
    }
}
