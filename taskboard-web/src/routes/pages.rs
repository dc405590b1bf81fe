//! Home and profile pages.
//!
//! Templating is out of scope, so page handlers return the JSON payload a
//! template would render.

use axum::{Extension, Json};
use serde::Serialize;
use serde_json::{json, Value};
use taskboard_shared::auth::middleware::CurrentUser;
use taskboard_shared::models::user::Role;

/// Home page
pub async fn home() -> Json<Value> {
    Json(json!({ "page": "home" }))
}

/// Profile page payload
#[derive(Debug, Serialize)]
pub struct ProfilePage {
    /// Employee number of the authenticated user
    pub user_id: i64,

    /// Account role
    pub role: Role,

    /// Manager reference, if any
    pub manager_id: Option<i64>,
}

/// Profile page for the authenticated user
pub async fn profile(Extension(current): Extension<CurrentUser>) -> Json<ProfilePage> {
    Json(ProfilePage {
        user_id: current.user.user_id,
        role: current.user.role,
        manager_id: current.user.manager_id,
    })
}
