//! Domain-level constants.
//!
//! These constants define business rules and user-facing messages.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length for user accounts
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Messages
// =============================================================================

/// Reported when any required field is absent or empty
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";

/// Reported when login is attempted without email or password
pub const MSG_CREDENTIALS_REQUIRED: &str = "Email and password are required";

/// Reported when a password and its confirmation differ
pub const MSG_PASSWORDS_MISMATCH: &str = "Passwords do not match";

/// Reported when an account password is under [`MIN_PASSWORD_LENGTH`] characters
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

/// Reported when a new password is given without its confirmation
pub const MSG_CONFIRMATION_REQUIRED: &str = "The new password must be confirmed";

// =============================================================================
// Entity names (used in not-found and conflict errors)
// =============================================================================

pub const ENTITY_USER: &str = "User";
pub const ENTITY_LICENSE: &str = "License";
pub const FIELD_EMAIL: &str = "Email";
pub const FIELD_LICENSE_NUMBER: &str = "License number";
