//! Session middleware for Axum.
//!
//! Resolves the `session` cookie into a [`CurrentUser`] principal and adds
//! it to request extensions, so every protected handler receives the
//! authenticated user explicitly instead of consulting global state.
//!
//! Requests without a usable session are redirected to `/login`, mirroring
//! how a browser-facing app treats an expired session: a bounce to the
//! login page, not a bare 401.
//!
//! # Example
//!
//! ```no_run
//! use axum::Extension;
//! use taskboard_shared::auth::middleware::CurrentUser;
//!
//! async fn handler(Extension(current): Extension<CurrentUser>) -> String {
//!     format!("Hello, user {}!", current.user.user_id)
//! }
//! ```

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tracing::debug;

use super::session::{validate_session_token, SessionError};
use crate::models::user::User;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Authenticated principal added to request extensions
///
/// The user record is loaded fresh from the database on every request, so
/// role or manager changes take effect without re-login.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The authenticated user
    pub user: User,
}

/// Error type for the session middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session cookie on the request
    #[error("No session cookie")]
    MissingSession,

    /// Session token failed validation
    #[error("Invalid session: {0}")]
    InvalidSession(#[from] SessionError),

    /// Session names a user that no longer exists
    #[error("Session user {0} not found")]
    UnknownUser(i64),

    /// Database error while loading the user
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::DatabaseError(e) => {
                tracing::error!("Session middleware database error: {}", e);
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                )
                    .into_response()
            }
            other => {
                debug!("Rejecting request: {}", other);
                Redirect::to("/login").into_response()
            }
        }
    }
}

/// Extracts a named cookie value from request headers
///
/// Handles multiple `Cookie` headers and the usual `name=value; other=...`
/// packing within each.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Session authentication middleware
///
/// Validates the session cookie, loads the named user, and inserts
/// [`CurrentUser`] into request extensions.
///
/// # Errors
///
/// Redirects to `/login` if the cookie is missing, the token is invalid or
/// expired, or the user no longer exists. Database failures are 500.
pub async fn session_auth_middleware(
    pool: SqlitePool,
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = cookie_value(req.headers(), SESSION_COOKIE)
        .ok_or(AuthError::MissingSession)?
        .to_string();

    let claims = validate_session_token(&token, &secret)?;

    let user = User::find_by_id(&pool, claims.sub)
        .await?
        .ok_or(AuthError::UnknownUser(claims.sub))?;

    req.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(req).await)
}
