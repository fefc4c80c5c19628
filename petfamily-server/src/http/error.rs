//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Internal failures are logged with a correlation id; the client gets the
//! id and a generic message, never the driver's text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// A referenced row does not exist (400)
    ReferenceNotFound { field: &'static str, message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Unique constraint violated (409)
    Conflict { message: &'static str },

    /// Dependent rows block a delete (400)
    InUse { message: &'static str },

    /// Status change not allowed from the current state (409)
    InvalidTransition { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::ReferenceNotFound { .. } | Self::InUse { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => {
                tracing::debug!(error = %e, "validation failed");
                let fields = e.fields();
                if fields.is_empty() {
                    json!({
                        "error": "validation_error",
                        "message": e.to_string()
                    })
                } else {
                    json!({
                        "error": "validation_error",
                        "message": e.to_string(),
                        "fields": fields
                    })
                }
            }
            Self::ReferenceNotFound { field, message } => {
                tracing::debug!(field, "reference not found");
                let mut body = json!({
                    "error": "reference_not_found",
                    "message": message
                });
                if !field.is_empty() {
                    body["fields"] = json!([field]);
                }
                body
            }
            Self::NotFound { message } => json!({
                "error": "not_found",
                "message": message
            }),
            Self::Conflict { message } => {
                tracing::debug!(reason = *message, "unique constraint violated");
                json!({
                    "error": "conflict",
                    "message": message
                })
            }
            Self::InUse { message } => {
                tracing::debug!(reason = *message, "delete blocked by dependents");
                json!({
                    "error": "in_use",
                    "message": message
                })
            }
            Self::InvalidTransition { message } => {
                tracing::warn!(reason = %message, "invalid status transition");
                json!({
                    "error": "invalid_transition",
                    "message": message
                })
            }
            Self::Database(e) => {
                // Log the actual error, return the correlation id only
                let correlation_id = Uuid::new_v4();
                tracing::error!(%correlation_id, error = %e, "Database error");
                json!({
                    "error": "internal_error",
                    "message": "Erro interno do servidor",
                    "correlationId": correlation_id
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { message, .. } => Self::NotFound { message },
            DbError::ReferenceNotFound { field, message } => {
                Self::ReferenceNotFound { field, message }
            }
            DbError::Conflict { message } => Self::Conflict { message },
            DbError::InUse { message } => Self::InUse { message },
            DbError::Invalid(e) => Self::Validation(e),
            e @ DbError::InvalidTransition { .. } => Self::InvalidTransition {
                message: e.to_string(),
            },
            e @ DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
