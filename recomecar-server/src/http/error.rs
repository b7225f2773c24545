//! API error type and its response mapping.
//!
//! Every failure becomes a status code plus a `{"detail": …}` body — the
//! shape the relief front end consumes. Internal errors are logged with the
//! driver message; the body carries only the summarized text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use recomecar_core::models::ValidationError;

use crate::db::DbError;

/// An error returned by a request handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(message) => Self::NotFound(message),
            DbError::Conflict { message, .. } => Self::Conflict(message),
            DbError::Unavailable(message) => Self::Unavailable(message),
            DbError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(message) => {
                tracing::warn!("service unavailable: {message}");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Internal(message) => {
                tracing::error!("internal error: {message}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
