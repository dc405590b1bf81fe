//! Task model and database operations.
//!
//! Tasks are created by a manager (the assignor) for one of their
//! subordinates (the assignee). `task_no` is an autoincrement primary key
//! and doubles as the list ordering key.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     task_no      INTEGER PRIMARY KEY AUTOINCREMENT,
//!     task         TEXT NOT NULL,
//!     created_date TEXT NOT NULL,
//!     due_date     TEXT NOT NULL,
//!     status       TEXT NOT NULL DEFAULT 'In Progress',
//!     assignee_id  INTEGER NOT NULL REFERENCES users(user_id),
//!     assignor_id  INTEGER NOT NULL REFERENCES users(user_id)
//! );
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::user::{Role, User};

/// Task status, a closed enumeration stored as its display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TaskStatus {
    /// Task has been assigned and is not yet done
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,

    /// Task is done
    #[serde(rename = "Completed")]
    #[sqlx(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Status as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// The opposite status. Applying twice returns the original.
    pub fn toggled(&self) -> TaskStatus {
        match self {
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::InProgress,
        }
    }

    /// Maps the `?filter=` query value onto a status.
    ///
    /// `"1"` selects Completed, `"2"` selects In Progress. Any other value
    /// (including absence) applies no filter.
    pub fn from_filter_param(param: Option<&str>) -> Option<TaskStatus> {
        match param {
            Some("1") => Some(TaskStatus::Completed),
            Some("2") => Some(TaskStatus::InProgress),
            _ => None,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Sequence number, assigned by the database
    pub task_no: i64,

    /// Free-text description
    pub task: String,

    /// When the task was created (UTC)
    pub created_date: DateTime<Utc>,

    /// Due date
    pub due_date: NaiveDate,

    /// Current status
    pub status: TaskStatus,

    /// User the task is assigned to
    pub assignee_id: i64,

    /// Manager who created the task
    pub assignor_id: i64,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Free-text description
    pub task: String,

    /// Due date
    pub due_date: NaiveDate,

    /// Initial status
    pub status: TaskStatus,

    /// User the task is assigned to
    pub assignee_id: i64,

    /// Manager creating the task
    pub assignor_id: i64,
}

/// Input for editing an existing task
///
/// The edit form always submits all three fields, so none are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New description
    pub task: String,

    /// New due date
    pub due_date: NaiveDate,

    /// New status
    pub status: TaskStatus,
}

const TASK_COLUMNS: &str =
    "task_no, task, created_date, due_date, status, assignee_id, assignor_id";

impl Task {
    /// Creates a new task, stamping `created_date` with the current time
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced user does not exist or the database
    /// connection fails.
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (task, created_date, due_date, status, assignee_id, assignor_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.task)
        .bind(Utc::now())
        .bind(data.due_date)
        .bind(data.status)
        .bind(data.assignee_id)
        .bind(data.assignor_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by sequence number
    ///
    /// Returns the task if found, None otherwise.
    pub async fn find_by_no(pool: &SqlitePool, task_no: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE task_no = $1",
        ))
        .bind(task_no)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists the tasks visible to a user, ordered by sequence number
    ///
    /// Employees see tasks where they are the assignee; managers see tasks
    /// where they are the assignor. An optional status filter narrows the
    /// result further.
    pub async fn list_visible(
        pool: &SqlitePool,
        user: &User,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE ");
        query.push_str(match user.role {
            Role::Employee => "assignee_id = $1",
            Role::Manager => "assignor_id = $1",
        });
        if status.is_some() {
            query.push_str(" AND status = $2");
        }
        query.push_str(" ORDER BY task_no");

        let mut q = sqlx::query_as::<_, Task>(&query).bind(user.user_id);
        if let Some(status) = status {
            q = q.bind(status);
        }

        let tasks = q.fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Updates a task's description, due date, and status
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task does not exist.
    pub async fn update(
        pool: &SqlitePool,
        task_no: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET task = $2, due_date = $3, status = $4
            WHERE task_no = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(task_no)
        .bind(data.task)
        .bind(data.due_date)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Flips a task between In Progress and Completed
    ///
    /// The flip happens in a single statement, so two concurrent toggles
    /// cannot read the same starting status.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task does not exist.
    pub async fn toggle_status(
        pool: &SqlitePool,
        task_no: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET status = CASE status WHEN 'In Progress' THEN 'Completed' ELSE 'In Progress' END
            WHERE task_no = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(task_no)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by sequence number
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it did not exist.
    pub async fn delete(pool: &SqlitePool, task_no: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_no = $1")
            .bind(task_no)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
