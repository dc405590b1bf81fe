//! Subordinate listing and assignment.
//!
//! # Endpoints
//!
//! - `GET /subordinate`            - All Employee-role accounts
//! - `GET /subordinate/:id/assign` - Point the target at the acting user
//!
//! The assignment is unconditional: there is no check that the target is
//! currently unmanaged, nor that the acting user holds the Manager role.
//! That matches the long-standing behavior of this app; tightening it is
//! an open product question, not something to change quietly here.

use crate::{app::AppState, error::WebResult};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Json,
};
use serde::Serialize;
use taskboard_shared::auth::middleware::CurrentUser;
use taskboard_shared::models::user::{Role, User};

/// One row of the subordinate listing
#[derive(Debug, Serialize)]
pub struct EmployeeRow {
    /// Employee number
    pub user_id: i64,

    /// Current manager, if any
    pub manager_id: Option<i64>,
}

/// Subordinate page payload
#[derive(Debug, Serialize)]
pub struct SubordinatePage {
    /// Every Employee-role account, assigned or not
    pub employees: Vec<EmployeeRow>,
}

/// Lists all Employee-role accounts
pub async fn list_employees(State(state): State<AppState>) -> WebResult<Json<SubordinatePage>> {
    let employees = User::list_by_role(&state.db, Role::Employee)
        .await?
        .into_iter()
        .map(|u| EmployeeRow {
            user_id: u.user_id,
            manager_id: u.manager_id,
        })
        .collect();

    Ok(Json(SubordinatePage { employees }))
}

/// Assigns the target user to the acting user
///
/// Returns 404 if the target does not exist; otherwise redirects back to
/// the subordinate listing.
pub async fn assign(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<i64>,
) -> WebResult<Redirect> {
    let updated = User::assign_manager(&state.db, user_id, current.user.user_id).await?;
    if !updated {
        return Err(crate::error::WebError::NotFound);
    }

    tracing::info!(
        subordinate = user_id,
        manager = current.user.user_id,
        "Assigned subordinate"
    );

    Ok(Redirect::to("/subordinate"))
}
