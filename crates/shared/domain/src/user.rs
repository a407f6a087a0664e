//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MSG_CREDENTIALS_REQUIRED;
use crate::error::{DomainResult, MissingFields};
use crate::input::{first_violation, supplied};
use crate::password::Password;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record with fresh timestamps
    pub fn new(id: Uuid, name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored credential as a password value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }

    /// Greeting returned after a successful login
    pub fn welcome_message(&self) -> String {
        format!("Welcome back, {}!", self.name)
    }
}

/// Registration payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    /// Display name
    #[serde(alias = "nombre")]
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "Ana"))]
    pub name: Option<String>,
    /// Email address (unique)
    #[serde(alias = "correo")]
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com"))]
    pub email: Option<String>,
    /// Password (minimum 6 characters)
    #[serde(alias = "contraseña")]
    #[validate(required, length(min = 6))]
    #[cfg_attr(feature = "openapi", schema(example = "secret1", min_length = 6))]
    pub password: Option<String>,
    /// Must equal `password`
    #[serde(alias = "confirmarContraseña")]
    #[validate(required, must_match(other = "password"))]
    #[cfg_attr(feature = "openapi", schema(example = "secret1"))]
    pub confirm_password: Option<String>,
}

/// Struct fields of [`RegisterUser`] paired with their wire names
const REGISTER_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("email", "email"),
    ("password", "password"),
    ("confirm_password", "confirmPassword"),
];

/// A registration that passed every input rule; the password is still plain text.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl RegisterUser {
    /// Drop empty strings so they read as "not supplied".
    pub fn normalized(self) -> Self {
        Self {
            name: supplied(self.name),
            email: supplied(self.email),
            password: supplied(self.password),
            confirm_password: supplied(self.confirm_password),
        }
    }

    /// Apply the registration rules in order: presence, confirmation, length.
    pub fn validate(self) -> DomainResult<NewUser> {
        let input = self.normalized();
        Validate::validate(&input)
            .map_err(|errors| first_violation(&errors, REGISTER_FIELDS, MissingFields::new()))?;

        // Presence was checked above
        Ok(NewUser {
            name: input.name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            password: input.password.unwrap_or_default(),
        })
    }
}

/// Login payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(alias = "correo")]
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com"))]
    pub email: Option<String>,
    #[serde(alias = "contraseña")]
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "secret1"))]
    pub password: Option<String>,
}

const CREDENTIAL_FIELDS: &[(&str, &str)] = &[("email", "email"), ("password", "password")];

impl Credentials {
    /// Require both email and password, returning them as `(email, password)`.
    pub fn validate(self) -> DomainResult<(String, String)> {
        let input = Self {
            email: supplied(self.email),
            password: supplied(self.password),
        };
        Validate::validate(&input).map_err(|errors| {
            first_violation(
                &errors,
                CREDENTIAL_FIELDS,
                MissingFields::with_message(MSG_CREDENTIALS_REQUIRED),
            )
        })?;

        Ok((
            input.email.unwrap_or_default(),
            input.password.unwrap_or_default(),
        ))
    }
}

/// User update payload; omitted or empty fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(alias = "nombre")]
    pub name: Option<String>,
    #[serde(alias = "correo")]
    pub email: Option<String>,
    /// New password; requires `confirmPassword`
    #[serde(alias = "contraseña")]
    pub password: Option<String>,
    #[serde(alias = "confirmarContraseña")]
    pub confirm_password: Option<String>,
}

impl UpdateUser {
    /// Drop empty strings so they read as "not supplied".
    pub fn normalized(self) -> Self {
        Self {
            name: supplied(self.name),
            email: supplied(self.email),
            password: supplied(self.password),
            confirm_password: supplied(self.confirm_password),
        }
    }
}

/// Field changes applied to a stored user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// User response (safe to return to client, never carries the hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MSG_FIELDS_REQUIRED, MSG_PASSWORDS_MISMATCH, MSG_PASSWORD_TOO_SHORT};
    use crate::error::DomainError;

    fn registration(password: &str, confirm: &str) -> RegisterUser {
        RegisterUser {
            name: Some("Ana".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some(password.to_string()),
            confirm_password: Some(confirm.to_string()),
        }
    }

    #[test]
    fn test_register_valid() {
        let new_user = registration("secret1", "secret1").validate().unwrap();
        assert_eq!(new_user.name, "Ana");
        assert_eq!(new_user.email, "a@x.com");
    }

    #[test]
    fn test_register_reports_missing_fields() {
        let input = RegisterUser {
            name: Some("Ana".to_string()),
            email: Some(String::new()),
            password: None,
            confirm_password: Some("secret1".to_string()),
        };

        match input.validate() {
            Err(DomainError::MissingFields(missing)) => {
                assert_eq!(missing.message(), MSG_FIELDS_REQUIRED);
                assert!(!missing.is_missing("name"));
                assert!(missing.is_missing("email"));
                assert!(missing.is_missing("password"));
                assert!(!missing.is_missing("confirmPassword"));
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_register_mismatch_checked_before_length() {
        let err = registration("abc", "abd").validate().unwrap_err();
        assert_eq!(err.to_string(), MSG_PASSWORDS_MISMATCH);
    }

    #[test]
    fn test_register_short_password() {
        let err = registration("abc", "abc").validate().unwrap_err();
        assert!(matches!(err, DomainError::Password(_)));
        assert_eq!(err.to_string(), MSG_PASSWORD_TOO_SHORT);
    }

    #[test]
    fn test_register_length_rule_counts_characters() {
        // Six characters, more than six bytes
        assert!(registration("ñañaña", "ñañaña").validate().is_ok());
        assert!(registration("ñañañ", "ñañañ").validate().is_err());
    }

    #[test]
    fn test_register_derived_rules() {
        let errors = Validate::validate(&registration("abc", "abd")).unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.keys().any(|name| AsRef::<str>::as_ref(name) == "password"));
        assert!(fields
            .keys()
            .any(|name| AsRef::<str>::as_ref(name) == "confirm_password"));
    }

    #[test]
    fn test_register_accepts_spanish_field_names() {
        let input: RegisterUser = serde_json::from_value(serde_json::json!({
            "nombre": "Ana",
            "correo": "a@x.com",
            "contraseña": "secret1",
            "confirmarContraseña": "secret1"
        }))
        .unwrap();

        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let creds = Credentials {
            email: Some("a@x.com".to_string()),
            password: None,
        };
        match creds.validate() {
            Err(DomainError::MissingFields(missing)) => {
                assert_eq!(missing.message(), MSG_CREDENTIALS_REQUIRED);
                assert!(!missing.is_missing("email"));
                assert!(missing.is_missing("password"));
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let user = User::new(
            Uuid::new_v4(),
            "Ana".to_string(),
            "a@x.com".to_string(),
            "$argon2id$hash".to_string(),
        );
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["name"], "Ana");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_welcome_message_contains_name() {
        let user = User::new(
            Uuid::new_v4(),
            "Ana".to_string(),
            "a@x.com".to_string(),
            String::new(),
        );
        assert!(user.welcome_message().contains("Ana"));
    }

    #[test]
    fn test_update_normalized_drops_empty_strings() {
        let update = UpdateUser {
            name: Some(String::new()),
            email: Some("b@x.com".to_string()),
            password: None,
            confirm_password: Some(String::new()),
        }
        .normalized();

        assert_eq!(update.name, None);
        assert_eq!(update.email.as_deref(), Some("b@x.com"));
        assert_eq!(update.confirm_password, None);
    }
}
