//! Unified error handling.
//!
//! Provides the single error type returned by every use case and its
//! conversion to Axum HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{PasswordError, ValidationErrors};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// Policy failures (`InvalidLogin`, `InvalidToken`, `UserNotFound`,
/// `UserConflict`) are stable kinds the adapter maps 1:1 to a status code.
/// Infrastructure failures are passed through untouched and rendered as a
/// generic server fault.
#[derive(Error, Debug)]
pub enum AppError {
    // Input shape
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("invalid JSON body")]
    InvalidJsonBody,

    // Authentication
    #[error("invalid phone number or password")]
    InvalidLogin,

    #[error("invalid / expired token, please login again")]
    InvalidToken,

    // Resource errors
    #[error("user not found")]
    UserNotFound,

    #[error("user record conflict, phone number must be unique")]
    UserConflict,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Token signing error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error")]
    Password(#[from] PasswordError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

/// A single rejected rule of a single field
#[derive(Debug, Serialize)]
struct FieldError {
    field: String,
    error: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidJsonBody => "BAD_REQUEST",
            AppError::InvalidLogin => "INVALID_LOGIN",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::UserNotFound => "NOT_FOUND",
            AppError::UserConflict => "CONFLICT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "TOKEN_ERROR",
            AppError::Password(_) => "PASSWORD_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidJsonBody | AppError::InvalidLogin => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::UserConflict => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Password(e) => {
                tracing::error!("Password error: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Client errors carry their own message
            _ => self.to_string(),
        }
    }

    /// Every rejected field/rule pair, for validation errors
    fn field_errors(&self) -> Vec<FieldError> {
        let AppError::Validation(errors) = self else {
            return Vec::new();
        };
        errors
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| FieldError {
                    field: field.to_string(),
                    error: message.clone(),
                })
            })
            .collect()
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
                fields: self.field_errors(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_policy_errors_map_to_status() {
        assert_eq!(AppError::InvalidLogin.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UserConflict.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidJsonBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = AppError::Password(PasswordError::new("salt exploded")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PASSWORD_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_invalid_token_body() {
        let body = body_json(AppError::InvalidToken.into_response()).await;

        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
        assert_eq!(
            body["error"]["message"],
            "invalid / expired token, please login again"
        );
        assert!(body["error"].get("fields").is_none());
    }

    #[tokio::test]
    async fn test_validation_errors_list_every_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "phone_no",
            vec!["phone_no too long".to_string(), "phone_no must only consist of digits".to_string()],
        );
        errors.add("full_name", vec!["full_name short".to_string()]);

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["fields"],
            serde_json::json!([
                {"field": "full_name", "error": "full_name short"},
                {"field": "phone_no", "error": "phone_no too long"},
                {"field": "phone_no", "error": "phone_no must only consist of digits"},
            ])
        );
    }
}
