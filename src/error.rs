//! Error types for the REST API.

use crate::db::StoreError;
use crate::validation::ValidationError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;


/// API error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
    /// Diagnostic detail for operators (driver message, SQLSTATE).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The payload or path failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The email is already used by another student.
    #[error("Email already exists")]
    DuplicateEmail,

    /// No student has the requested id.
    #[error("Student not found: {0}")]
    NotFound(i32),

    /// The database could not be reached.
    #[error("Database connection failed, make sure PostgreSQL is running")]
    ConnectionUnavailable(String),

    /// The schema bootstrap failed.
    #[error("Database initialization failed: {0}")]
    SchemaInitFailed(String),

    /// Any other persistence failure.
    #[error("Failed to {operation}")]
    Persistence {
        /// What the handler was doing, e.g. "create student".
        operation: &'static str,
        /// Driver or server message.
        message: String,
        /// SQLSTATE, when reported.
        code: Option<String>,
    },
}

impl ApiError {
    /// Maps a store failure raised while performing `operation`.
    #[must_use]
    pub fn from_store(operation: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => ApiError::DuplicateEmail,
            StoreError::Unavailable(message) => ApiError::ConnectionUnavailable(message),
            StoreError::Query { message, code } => ApiError::Persistence {
                operation,
                message,
                code,
            },
        }
    }

    /// HTTP status and stable error code.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::DuplicateEmail => (StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::ConnectionUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONNECTION_UNAVAILABLE")
            }
            ApiError::SchemaInitFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SCHEMA_INIT_FAILED")
            }
            ApiError::Persistence { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR"),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::ConnectionUnavailable(message) => Some(message.clone()),
            ApiError::Persistence {
                message,
                code: Some(code),
                ..
            } => Some(format!("{message} (SQLSTATE {code})")),
            ApiError::Persistence { message, .. } => Some(message.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details: self.details(),
        });

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}
