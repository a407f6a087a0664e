//! Helpers for request input handling.

use validator::ValidationErrors;

use crate::constants::{MSG_PASSWORDS_MISMATCH, MSG_PASSWORD_TOO_SHORT};
use crate::error::{DomainError, MissingFields};

/// Rule codes emitted by the derived validators
pub(crate) const RULE_REQUIRED: &str = "required";
pub(crate) const RULE_MUST_MATCH: &str = "must_match";
pub(crate) const RULE_LENGTH: &str = "length";

/// Normalize an optional text input: empty strings count as not supplied.
pub fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Whether `field` failed the rule identified by `code`.
pub(crate) fn failed(errors: &ValidationErrors, field: &str, code: &str) -> bool {
    errors.field_errors().into_iter().any(|(name, errs)| {
        let name: &str = name.as_ref();
        name == field && errs.iter().any(|e| e.code == code)
    })
}

/// Reduce validator failures to the first broken rule.
///
/// Presence is reported first (with the full per-field breakdown), then the
/// password confirmation, then the password length. `fields` pairs each
/// struct field with its name on the wire.
pub(crate) fn first_violation(
    errors: &ValidationErrors,
    fields: &[(&str, &'static str)],
    missing: MissingFields,
) -> DomainError {
    let missing = fields.iter().fold(missing, |acc, &(field, wire)| {
        acc.record(wire, failed(errors, field, RULE_REQUIRED))
    });
    if missing.any() {
        return DomainError::MissingFields(missing);
    }

    if fields
        .iter()
        .any(|&(field, _)| failed(errors, field, RULE_MUST_MATCH))
    {
        return DomainError::validation(MSG_PASSWORDS_MISMATCH);
    }

    if fields
        .iter()
        .any(|&(field, _)| failed(errors, field, RULE_LENGTH))
    {
        return DomainError::password(MSG_PASSWORD_TOO_SHORT);
    }

    DomainError::validation(errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_supplied() {
        assert_eq!(supplied(None), None);
        assert_eq!(supplied(Some(String::new())), None);
        assert_eq!(supplied(Some("Ana".to_string())), Some("Ana".to_string()));
    }

    const FIELDS: &[(&str, &str)] = &[("password", "password"), ("confirm_password", "confirmPassword")];

    #[test]
    fn test_presence_reported_before_other_rules() {
        let mut errors = ValidationErrors::new();
        errors.add("password", ValidationError::new(RULE_LENGTH));
        errors.add("confirm_password", ValidationError::new(RULE_REQUIRED));

        match first_violation(&errors, FIELDS, MissingFields::new()) {
            DomainError::MissingFields(missing) => {
                assert!(missing.is_missing("confirmPassword"));
                assert!(!missing.is_missing("password"));
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatch_reported_before_length() {
        let mut errors = ValidationErrors::new();
        errors.add("password", ValidationError::new(RULE_LENGTH));
        errors.add("confirm_password", ValidationError::new(RULE_MUST_MATCH));

        let err = first_violation(&errors, FIELDS, MissingFields::new());
        assert_eq!(err.to_string(), MSG_PASSWORDS_MISMATCH);
    }
}
