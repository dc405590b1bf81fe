//! One-shot flash messages.
//!
//! Recoverable failures (duplicate registration, bad credentials,
//! unauthorized task mutations) surface as a redirect to a sensible prior
//! page plus a short-lived `flash` cookie. The next page view consumes the
//! cookie and returns the human-readable message in its payload.
//!
//! The cookie stores a stable message code rather than the message text,
//! which keeps the value free of characters that would need escaping.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use taskboard_shared::auth::middleware::cookie_value;

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "flash";

/// Flash message codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flash {
    /// Registration attempted with an existing employee number
    UserExists,

    /// Login failed (unknown id or wrong password)
    BadLogin,

    /// Non-manager attempted to create a task
    NotAuthorizedCreate,

    /// Non-manager attempted to edit a task
    NotAuthorizedEdit,

    /// Non-manager attempted to delete a task
    NotAuthorizedDelete,
}

impl Flash {
    /// Stable code stored in the cookie
    pub fn code(&self) -> &'static str {
        match self {
            Flash::UserExists => "user_exists",
            Flash::BadLogin => "bad_login",
            Flash::NotAuthorizedCreate => "not_authorized_create",
            Flash::NotAuthorizedEdit => "not_authorized_edit",
            Flash::NotAuthorizedDelete => "not_authorized_delete",
        }
    }

    /// Parses a cookie code back into a flash message
    pub fn from_code(code: &str) -> Option<Flash> {
        match code {
            "user_exists" => Some(Flash::UserExists),
            "bad_login" => Some(Flash::BadLogin),
            "not_authorized_create" => Some(Flash::NotAuthorizedCreate),
            "not_authorized_edit" => Some(Flash::NotAuthorizedEdit),
            "not_authorized_delete" => Some(Flash::NotAuthorizedDelete),
            _ => None,
        }
    }

    /// User-visible message text
    pub fn message(&self) -> &'static str {
        match self {
            Flash::UserExists => "User already exists",
            Flash::BadLogin => "Please check your login details and try again",
            Flash::NotAuthorizedCreate => "You are not authorized to create a task",
            Flash::NotAuthorizedEdit => "You are not authorized to edit a task",
            Flash::NotAuthorizedDelete => "You are not authorized to delete a task",
        }
    }
}

/// Reads the pending flash message from request headers, if any
pub fn pending_flash(headers: &HeaderMap) -> Option<Flash> {
    cookie_value(headers, FLASH_COOKIE).and_then(Flash::from_code)
}

/// `Set-Cookie` value that stores a flash message
fn set_cookie(flash: Flash) -> HeaderValue {
    // Codes are static ASCII, so this cannot fail.
    HeaderValue::from_str(&format!("{}={}; Path=/; HttpOnly", FLASH_COOKIE, flash.code()))
        .expect("flash cookie value is valid ASCII")
}

/// `Set-Cookie` value that clears the flash cookie
fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; HttpOnly; Max-Age=0")
}

/// Redirects to `to`, carrying a flash message for the next page view
pub fn flash_redirect(to: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    response.headers_mut().append(header::SET_COOKIE, set_cookie(flash));
    response
}

/// Attaches a clear-flash cookie to a page response
///
/// Page handlers that returned a pending flash message call this so the
/// message shows exactly once.
pub fn consume_flash(mut response: Response) -> Response {
    response.headers_mut().append(header::SET_COOKIE, clear_cookie());
    response
}
