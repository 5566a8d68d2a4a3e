//! Axum-specific error types and mappings.
//!
//! Maps core log access errors to HTTP status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logdeck_core::{LogAccessError, PathGuardError, UnknownStreamKind};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The path resolves outside the allowed log root.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<PathGuardError> for HttpError {
    fn from(err: PathGuardError) -> Self {
        match err {
            PathGuardError::NotFound(_) => Self::NotFound(err.to_string()),
            PathGuardError::InvalidPath(_) | PathGuardError::WrongType { .. } => {
                Self::BadRequest(err.to_string())
            }
            PathGuardError::OutsideBase { .. } => Self::Forbidden(err.to_string()),
            PathGuardError::Io { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<LogAccessError> for HttpError {
    fn from(err: LogAccessError) -> Self {
        match err {
            LogAccessError::Path(path_err) => path_err.into(),
            LogAccessError::InvalidPageSize(_) => Self::BadRequest(err.to_string()),
            LogAccessError::Io { .. } | LogAccessError::Watch(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<UnknownStreamKind> for HttpError {
    fn from(err: UnknownStreamKind) -> Self {
        Self::BadRequest(err.to_string())
    }
}
