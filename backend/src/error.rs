//! Application error handling
//!
//! One error type for every handler. Client errors carry their message
//! through; internal errors are logged and replaced with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use wellness_shared::validation::ValidationError;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidField {
            message: err.user_message(),
            field: err.field,
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let (status, code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            ApiError::InvalidField { field: f, message } => {
                field = Some(f);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Parse a path id, mapping failure to a 400
pub fn parse_id(id: &str, what: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(id).map_err(|_| ApiError::Validation(format!("Invalid {} ID", what)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::InvalidField { field: "age".into(), message: "bad".into() }, StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound("missing".into()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Unauthorized("no session".into()), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::Conflict("dupe".into()), StatusCode::CONFLICT)]
    #[case(ApiError::RateLimited("slow down".into()), StatusCode::TOO_MANY_REQUESTS)]
    #[case(ApiError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_status(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn test_field_validation_error() {
        let err: ApiError = ValidationError::new("heart_rate", "Heart rate too low").into();
        match &err {
            ApiError::InvalidField { field, message } => {
                assert_eq!(field, "heart_rate");
                assert_eq!(message, "Heart Rate: Heart rate too low");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("not-a-uuid", "goal").is_err());
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "goal").unwrap(), id);
    }
}
