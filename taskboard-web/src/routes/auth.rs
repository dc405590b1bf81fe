//! Authentication endpoints: registration, login, logout.
//!
//! # Endpoints
//!
//! - `GET  /register` - Registration page payload
//! - `POST /register` - Create an account and log it in
//! - `GET  /login`    - Login page payload
//! - `POST /login`    - Authenticate and establish a session
//! - `GET  /logout`   - Clear the session
//!
//! Successful authentication sets the `session` cookie; failures bounce
//! back to the form page with a flash message.

use crate::{
    app::AppState,
    error::WebResult,
    flash::{consume_flash, flash_redirect, pending_flash, Flash},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use taskboard_shared::auth::middleware::{CurrentUser, SESSION_COOKIE};
use taskboard_shared::auth::password::{hash_password, verify_password};
use taskboard_shared::auth::session::{create_session_token, SessionClaims, SessionKind};
use taskboard_shared::models::user::{CreateUser, Role, User};

/// Registration form
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Employee number
    pub id: i64,

    /// Plaintext password (hashed before storage)
    pub password: String,

    /// Requested role; deserializing into the closed enum is the
    /// boundary validation
    pub role: Role,

    /// Optional manager reference; HTML forms post an empty string when
    /// the field is left blank
    #[serde(default)]
    pub manager_id: Option<String>,
}

impl RegisterForm {
    fn manager_id(&self) -> Option<i64> {
        self.manager_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Employee number
    pub id: i64,

    /// Plaintext password
    pub password: String,

    /// "Remember me" checkbox; present ("on") when ticked
    #[serde(default)]
    pub remember: Option<String>,
}

/// Registration page payload (with any pending flash message)
pub async fn register_page(headers: HeaderMap) -> Response {
    page_with_flash("register", &headers)
}

/// Register a new account
///
/// Fails with a flash redirect back to `/register` if the employee number
/// already exists. On success the new account is logged in immediately and
/// redirected to the home page.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    if User::find_by_id(&state.db, form.id).await?.is_some() {
        return Ok(flash_redirect("/register", Flash::UserExists));
    }

    let password_hash = hash_password(&form.password)?;

    let user = match User::create(
        &state.db,
        CreateUser {
            user_id: form.id,
            password_hash,
            role: form.role,
            manager_id: form.manager_id(),
        },
    )
    .await
    {
        Ok(user) => user,
        // Lost a race with a concurrent registration for the same id.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Ok(flash_redirect("/register", Flash::UserExists));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.user_id, role = user.role.as_str(), "Registered new user");

    establish_session(&state, user.user_id, SessionKind::Standard, "/")
}

/// Login page payload (with any pending flash message)
pub async fn login_page(headers: HeaderMap) -> Response {
    page_with_flash("login", &headers)
}

/// Authenticate and establish a session
///
/// Fails with a flash redirect back to `/login` if the employee number is
/// unknown or the password does not verify. The failure message does not
/// distinguish the two cases.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let user = match User::find_by_id(&state.db, form.id).await? {
        Some(user) => user,
        None => return Ok(flash_redirect("/login", Flash::BadLogin)),
    };

    if !verify_password(&form.password, &user.password_hash)? {
        return Ok(flash_redirect("/login", Flash::BadLogin));
    }

    let kind = if form.remember.is_some() {
        SessionKind::Remembered
    } else {
        SessionKind::Standard
    };

    tracing::info!(user_id = user.user_id, "User logged in");

    establish_session(&state, user.user_id, kind, "/profile")
}

/// Clear the session and return to the login page
pub async fn logout(Extension(current): Extension<CurrentUser>) -> Response {
    tracing::info!(user_id = current.user.user_id, "User logged out");

    let mut response = Redirect::to("/login").into_response();
    response
        .headers_mut()
        .append(header::SET_COOKIE, clear_session_cookie());
    response
}

/// Mints a session token and redirects with the session cookie set
fn establish_session(
    state: &AppState,
    user_id: i64,
    kind: SessionKind,
    to: &str,
) -> WebResult<Response> {
    let claims = SessionClaims::new(user_id, kind);
    let token = create_session_token(&claims, state.session_secret())?;

    let mut response = Redirect::to(to).into_response();
    response
        .headers_mut()
        .append(header::SET_COOKIE, session_cookie(&token, kind));
    Ok(response)
}

fn session_cookie(token: &str, kind: SessionKind) -> HeaderValue {
    let max_age = kind.duration().num_seconds();
    // Tokens are base64url, so the value is always valid ASCII.
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    ))
    .expect("session cookie value is valid ASCII")
}

fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn page_with_flash(page: &str, headers: &HeaderMap) -> Response {
    let flash = pending_flash(headers);
    let response = Json(json!({
        "page": page,
        "flash": flash.map(|f| f.message()),
    }))
    .into_response();

    if flash.is_some() {
        consume_flash(response)
    } else {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_id_parsing() {
        let form = RegisterForm {
            id: 2,
            password: "pass".to_string(),
            role: Role::Employee,
            manager_id: Some("101".to_string()),
        };
        assert_eq!(form.manager_id(), Some(101));
    }

    #[test]
    fn test_manager_id_blank_is_none() {
        let blank = RegisterForm {
            id: 2,
            password: "pass".to_string(),
            role: Role::Employee,
            manager_id: Some(String::new()),
        };
        assert_eq!(blank.manager_id(), None);

        let absent = RegisterForm {
            id: 2,
            password: "pass".to_string(),
            role: Role::Employee,
            manager_id: None,
        };
        assert_eq!(absent.manager_id(), None);
    }

    #[test]
    fn test_session_cookie_carries_max_age() {
        let cookie = session_cookie("tok", SessionKind::Remembered);
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("session=tok"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains(&format!("Max-Age={}", 30 * 24 * 3600)));
    }
}
