//! License domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainResult, MissingFields};
use crate::input::{first_violation, supplied};

/// License domain entity.
///
/// Unlike [`crate::User`], the stored hash is part of the serialized form:
/// license reads have always returned it and clients may depend on the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: Uuid,
    pub full_name: String,
    pub license_number: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// License creation payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateLicense {
    #[serde(alias = "nombreCompleto")]
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "Ana Pérez"))]
    pub full_name: Option<String>,
    #[serde(alias = "numeroLicencia")]
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "LIC-0001"))]
    pub license_number: Option<String>,
    #[validate(required)]
    #[cfg_attr(feature = "openapi", schema(example = "ana@x.com"))]
    pub email: Option<String>,
    /// Any length is accepted
    #[validate(required)]
    pub password: Option<String>,
    #[serde(alias = "confirmarPassword")]
    #[validate(required, must_match(other = "password"))]
    pub confirm_password: Option<String>,
}

const LICENSE_FIELDS: &[(&str, &str)] = &[
    ("full_name", "fullName"),
    ("license_number", "licenseNumber"),
    ("email", "email"),
    ("password", "password"),
    ("confirm_password", "confirmPassword"),
];

/// A license creation that passed input validation; password still plain text.
#[derive(Clone)]
pub struct ValidLicense {
    pub full_name: String,
    pub license_number: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for ValidLicense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidLicense")
            .field("full_name", &self.full_name)
            .field("license_number", &self.license_number)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CreateLicense {
    /// Drop empty strings so they read as "not supplied".
    pub fn normalized(self) -> Self {
        Self {
            full_name: supplied(self.full_name),
            license_number: supplied(self.license_number),
            email: supplied(self.email),
            password: supplied(self.password),
            confirm_password: supplied(self.confirm_password),
        }
    }

    /// Check presence of every field, then password confirmation.
    pub fn validate(self) -> DomainResult<ValidLicense> {
        let input = self.normalized();
        Validate::validate(&input)
            .map_err(|errors| first_violation(&errors, LICENSE_FIELDS, MissingFields::new()))?;

        Ok(ValidLicense {
            full_name: input.full_name.unwrap_or_default(),
            license_number: input.license_number.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            password: input.password.unwrap_or_default(),
        })
    }
}

/// Record handed to the store on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLicense {
    pub full_name: String,
    pub license_number: String,
    pub email: String,
    pub password_hash: String,
}

/// License update payload; omitted or empty fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicense {
    #[serde(alias = "nombreCompleto")]
    pub full_name: Option<String>,
    #[serde(alias = "numeroLicencia")]
    pub license_number: Option<String>,
    pub email: Option<String>,
    /// Only applied together with `confirmPassword`
    pub password: Option<String>,
    #[serde(alias = "confirmarPassword")]
    pub confirm_password: Option<String>,
}

impl UpdateLicense {
    /// Drop empty strings so they read as "not supplied".
    pub fn normalized(self) -> Self {
        Self {
            full_name: supplied(self.full_name),
            license_number: supplied(self.license_number),
            email: supplied(self.email),
            password: supplied(self.password),
            confirm_password: supplied(self.confirm_password),
        }
    }
}

/// Field changes applied to a stored license
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseChanges {
    pub full_name: Option<String>,
    pub license_number: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
