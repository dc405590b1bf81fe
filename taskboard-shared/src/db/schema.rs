//! Idempotent schema application.
//!
//! The schema is two tables. Both statements are `CREATE TABLE IF NOT
//! EXISTS`, so [`ensure_schema`] can run on every boot; an already-migrated
//! database is left untouched.

use sqlx::SqlitePool;
use tracing::info;

/// Users table: employee-number keyed accounts with a self-referential
/// manager link. Role is stored as text but only ever written from the
/// closed `Role` enum.
const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id       INTEGER PRIMARY KEY,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL DEFAULT 'Employee',
    manager_id    INTEGER REFERENCES users(user_id)
)
"#;

/// Tasks table: `task_no` doubles as the list ordering key.
const CREATE_TASKS: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    task_no      INTEGER PRIMARY KEY AUTOINCREMENT,
    task         TEXT NOT NULL,
    created_date TEXT NOT NULL,
    due_date     TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'In Progress',
    assignee_id  INTEGER NOT NULL REFERENCES users(user_id),
    assignor_id  INTEGER NOT NULL REFERENCES users(user_id)
)
"#;

/// Applies the schema, creating any missing tables.
///
/// # Errors
///
/// Returns an error if a DDL statement fails to execute.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Applying database schema");

    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_TASKS).execute(pool).await?;

    info!("Database schema is up to date");
    Ok(())
}
