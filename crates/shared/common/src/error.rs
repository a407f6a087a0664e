//! Unified error handling for the HTTP surface.
//!
//! Provides a single error type shared by the services and the gateway that
//! converts into an Axum HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, MissingFields};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is already registered")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.message())]
    MissingFields(MissingFields),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Store errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<MissingFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

/// Message shared by every failed login, whichever check failed
pub const INVALID_CREDENTIALS_MESSAGE: &str = "The email or password is incorrect";

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) | AppError::MissingFields(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code.
    ///
    /// Uniqueness conflicts are reported as 400, like other input problems.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_)
            | AppError::Validation(_)
            | AppError::MissingFields(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Underlying store message, kept for diagnostics
    fn detail(&self) -> Option<String> {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                detail: self.detail(),
                missing_fields: match self {
                    AppError::MissingFields(missing) => Some(missing),
                    _ => None,
                },
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::MissingFields(missing) => AppError::MissingFields(missing),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Translate a failed write: unique-index violations become conflicts.
///
/// `conflicting_field` receives the driver's message and names the field to
/// report.
#[cfg(feature = "database")]
pub fn write_error(
    err: sea_orm::DbErr,
    conflicting_field: impl FnOnce(&str) -> &'static str,
) -> AppError {
    let violation = err.sql_err();
    classify_write_error(err, violation, conflicting_field)
}

#[cfg(feature = "database")]
fn classify_write_error(
    err: sea_orm::DbErr,
    violation: Option<sea_orm::SqlErr>,
    conflicting_field: impl FnOnce(&str) -> &'static str,
) -> AppError {
    match violation {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
            AppError::conflict(conflicting_field(&detail))
        }
        _ => AppError::Database(err),
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn conflict(field: impl Into<String>) -> Self {
        AppError::Conflict(field.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("Email").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_found("User").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::not_found("User").to_string(), "User not found");
        assert_eq!(
            AppError::conflict("Email").to_string(),
            "Email is already registered"
        );
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::internal("argon2 exploded");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_missing_fields_body() {
        let missing = MissingFields::new()
            .record("name", true)
            .record("email", false);
        let (status, body) = body_json(AppError::from(DomainError::MissingFields(missing))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["missingFields"]["name"], true);
        assert_eq!(body["error"]["missingFields"]["email"], false);
    }

    #[tokio::test]
    async fn test_plain_error_body_has_no_breakdown() {
        let (status, body) = body_json(AppError::not_found("License")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "License not found");
        assert!(body["error"].get("missingFields").is_none());
        assert!(body["error"].get("detail").is_none());
    }

    #[test]
    fn test_password_policy_maps_to_validation() {
        let err = AppError::from(DomainError::password("too short"));
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[cfg(feature = "database")]
    mod write_errors {
        use super::*;
        use sea_orm::{DbErr, SqlErr};

        fn field_from_index(detail: &str) -> &'static str {
            if detail.contains("license_number") {
                "License number"
            } else {
                "Email"
            }
        }

        #[test]
        fn test_unique_violation_becomes_conflict_on_named_field() {
            let violation = SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"idx_licenses_email\"".to_string(),
            );
            let err = classify_write_error(
                DbErr::Custom("insert failed".to_string()),
                Some(violation),
                field_from_index,
            );

            assert!(matches!(err, AppError::Conflict(ref field) if field == "Email"));
            assert_eq!(err.code(), "CONFLICT");
        }

        #[test]
        fn test_other_constraint_stays_database_error() {
            let violation = SqlErr::ForeignKeyConstraintViolation("fk_missing".to_string());
            let err = classify_write_error(
                DbErr::Custom("insert failed".to_string()),
                Some(violation),
                field_from_index,
            );

            assert!(matches!(err, AppError::Database(_)));
        }

        #[test]
        fn test_driver_error_without_sql_detail_stays_database_error() {
            let err = write_error(DbErr::Custom("connection reset".to_string()), |_| {
                panic!("no field to name without a constraint violation")
            });

            assert!(matches!(err, AppError::Database(_)));
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
