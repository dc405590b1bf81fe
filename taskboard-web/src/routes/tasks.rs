//! Task endpoints: visibility, CRUD, and status toggling.
//!
//! # Endpoints
//!
//! - `GET  /tasks`            - Visible tasks, optionally filtered by status
//! - `GET  /task/create`      - Create-form payload (subordinate ids)
//! - `POST /task/create`      - Create a task (Manager only)
//! - `GET  /task/:no`         - Task detail
//! - `GET  /task/:no/edit`    - Edit-form payload
//! - `POST /task/:no/edit`    - Edit a task (Manager only)
//! - `GET  /task/:no/status`  - Toggle In Progress / Completed
//! - `GET  /task/:no/delete`  - Delete a task (Manager only)
//!
//! # Visibility
//!
//! Employees see tasks where they are the assignee; managers see tasks
//! where they are the assignor. `?filter=1` narrows to Completed,
//! `?filter=2` to In Progress; any other value passes through unfiltered.
//!
//! # Authorization
//!
//! Create, edit, and delete require the Manager role and bounce
//! non-managers back to `/tasks` with a flash message. Toggling status
//! deliberately has no role check beyond authentication: whether status
//! should be restricted to the assignee is an open product question, so
//! the historical any-viewer behavior is kept.

use crate::{
    app::AppState,
    error::{WebError, WebResult},
    flash::{consume_flash, flash_redirect, pending_flash, Flash},
};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use taskboard_shared::auth::middleware::CurrentUser;
use taskboard_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use taskboard_shared::models::user::User;

/// Query parameters for the task list
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    /// Status filter: "1" = Completed, "2" = In Progress, anything else = all
    pub filter: Option<String>,
}

/// Task creation form
#[derive(Debug, Deserialize)]
pub struct CreateTaskForm {
    /// Free-text description
    pub task: String,

    /// Due date (YYYY-MM-DD)
    pub due: NaiveDate,

    /// Initial status
    pub status: TaskStatus,

    /// Assignee employee number
    pub assignee: i64,
}

/// Task edit form
#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    /// New description
    pub task: String,

    /// New due date (YYYY-MM-DD)
    pub due: NaiveDate,

    /// New status
    pub status: TaskStatus,
}

/// Lists the tasks visible to the current user
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<TaskListQuery>,
    headers: HeaderMap,
) -> WebResult<Response> {
    let status = TaskStatus::from_filter_param(query.filter.as_deref());
    let tasks = Task::list_visible(&state.db, &current.user, status).await?;

    let flash = pending_flash(&headers);
    let response = Json(json!({
        "tasks": tasks,
        "flash": flash.map(|f| f.message()),
    }))
    .into_response();

    Ok(if flash.is_some() {
        consume_flash(response)
    } else {
        response
    })
}

/// Create-form payload: the acting manager's subordinate ids
pub async fn create_task_page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> WebResult<Response> {
    if !current.user.is_manager() {
        return Ok(flash_redirect("/tasks", Flash::NotAuthorizedCreate));
    }

    let subordinates = User::list_subordinate_ids(&state.db, current.user.user_id).await?;

    Ok(Json(json!({ "subordinates": subordinates })).into_response())
}

/// Creates a task with the acting manager as assignor
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Form(form): Form<CreateTaskForm>,
) -> WebResult<Response> {
    if !current.user.is_manager() {
        return Ok(flash_redirect("/tasks", Flash::NotAuthorizedCreate));
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            task: form.task,
            due_date: form.due,
            status: form.status,
            assignee_id: form.assignee,
            assignor_id: current.user.user_id,
        },
    )
    .await?;

    tracing::info!(
        task_no = task.task_no,
        assignee = task.assignee_id,
        assignor = task.assignor_id,
        "Created task"
    );

    Ok(Redirect::to(&format!("/task/{}", task.task_no)).into_response())
}

/// Task detail
pub async fn task_detail(
    State(state): State<AppState>,
    Path(task_no): Path<i64>,
) -> WebResult<Json<Task>> {
    let task = Task::find_by_no(&state.db, task_no)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Json(task))
}

/// Edit-form payload: the task's current values
///
/// Lookup happens before the role check, so a missing task is a 404 even
/// for non-managers.
pub async fn edit_task_page(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(task_no): Path<i64>,
) -> WebResult<Response> {
    let task = Task::find_by_no(&state.db, task_no)
        .await?
        .ok_or(WebError::NotFound)?;

    if !current.user.is_manager() {
        return Ok(flash_redirect("/tasks", Flash::NotAuthorizedEdit));
    }

    Ok(Json(task).into_response())
}

/// Edits a task's description, due date, and status
pub async fn edit_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(task_no): Path<i64>,
    Form(form): Form<EditTaskForm>,
) -> WebResult<Response> {
    if !current.user.is_manager() {
        return Ok(flash_redirect("/tasks", Flash::NotAuthorizedEdit));
    }

    let task = Task::update(
        &state.db,
        task_no,
        UpdateTask {
            task: form.task,
            due_date: form.due,
            status: form.status,
        },
    )
    .await?
    .ok_or(WebError::NotFound)?;

    tracing::info!(task_no = task.task_no, "Edited task");

    Ok(Redirect::to(&format!("/task/{}", task.task_no)).into_response())
}

/// Flips a task between In Progress and Completed
///
/// No role check beyond authentication; see the module docs.
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(task_no): Path<i64>,
) -> WebResult<Redirect> {
    let task = Task::toggle_status(&state.db, task_no)
        .await?
        .ok_or(WebError::NotFound)?;

    tracing::info!(
        task_no = task.task_no,
        status = task.status.as_str(),
        "Toggled task status"
    );

    Ok(Redirect::to("/tasks"))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(task_no): Path<i64>,
) -> WebResult<Response> {
    if !current.user.is_manager() {
        return Ok(flash_redirect("/tasks", Flash::NotAuthorizedDelete));
    }

    let deleted = Task::delete(&state.db, task_no).await?;
    if !deleted {
        return Err(WebError::NotFound);
    }

    tracing::info!(task_no, "Deleted task");

    Ok(Redirect::to("/tasks").into_response())
}
