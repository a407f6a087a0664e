//! Password value object - Domain layer password handling.
//!
//! Encapsulates Argon2 hashing, verification and the password rules shared by
//! user accounts and licenses.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use validator::Validate;

use crate::constants::{MSG_CONFIRMATION_REQUIRED, MSG_PASSWORDS_MISMATCH, MSG_PASSWORD_TOO_SHORT};
use crate::error::{DomainError, DomainResult};

/// Account password policy; the minimum matches `MIN_PASSWORD_LENGTH`.
#[derive(Validate)]
struct AccountPassword<'a> {
    #[validate(length(min = 6))]
    password: &'a str,
}

/// A password together with its confirmation
#[derive(Validate)]
struct Confirmed<'a> {
    password: &'a str,
    #[validate(must_match(other = "password"))]
    confirmation: &'a str,
}

/// Password value object that handles hashing and verification.
///
/// Only ever holds the PHC hash string, never the plain text.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password after applying the account password policy.
    ///
    /// # Errors
    /// Returns a password error if the plain text is shorter than
    /// [`crate::MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::check_policy(plain_text)?;
        Self::new_unchecked(plain_text)
    }

    /// Hash a plain text password without applying any length policy.
    ///
    /// Licenses accept any non-empty password.
    pub fn new_unchecked(plain_text: &str) -> DomainResult<Self> {
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from the store).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Check the account password policy without hashing.
    ///
    /// Length is counted in characters, not bytes.
    pub fn check_policy(plain_text: &str) -> DomainResult<()> {
        AccountPassword {
            password: plain_text,
        }
        .validate()
        .map_err(|_| DomainError::password(MSG_PASSWORD_TOO_SHORT))
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Require that a password and its confirmation are identical.
pub fn ensure_confirmed(password: &str, confirmation: &str) -> DomainResult<()> {
    Confirmed {
        password,
        confirmation,
    }
    .validate()
    .map_err(|_| DomainError::validation(MSG_PASSWORDS_MISMATCH))
}

/// Validate a password change where the confirmation is mandatory.
pub fn ensure_change_confirmed(password: &str, confirmation: Option<&str>) -> DomainResult<()> {
    let confirmation =
        confirmation.ok_or_else(|| DomainError::validation(MSG_CONFIRMATION_REQUIRED))?;
    ensure_confirmed(password, confirmation)?;
    Password::check_policy(password)
}
