//! Success envelopes.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{ success, message, data }` envelope returned by mutations and login
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope without a payload (deletes)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// 201 response carrying an envelope
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> Created<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse::with_data(message, data)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("User deleted successfully")).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
    }
}
