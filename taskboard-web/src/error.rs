//! Error handling for the web server.
//!
//! Handlers return `WebResult<T>`; failures map to HTTP responses.
//! User-recoverable failures (bad login, unauthorized edit) are not errors
//! here — those are flash-message redirects built in `crate::flash`. This
//! type covers the genuinely broken cases: missing records and internal
//! failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskboard_shared::auth::{password::PasswordError, session::SessionError};

/// Handler result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unified web error type
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Record not found (404)
    #[error("Not found")]
    NotFound,

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            WebError::Internal(detail) => {
                // Log the detail but don't expose it to clients.
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

impl From<sqlx::Error> for WebError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => WebError::NotFound,
            other => WebError::Internal(format!("Database error: {}", other)),
        }
    }
}

impl From<PasswordError> for WebError {
    fn from(err: PasswordError) -> Self {
        WebError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<SessionError> for WebError {
    fn from(err: SessionError) -> Self {
        WebError::Internal(format!("Session operation failed: {}", err))
    }
}
