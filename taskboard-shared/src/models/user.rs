//! User model and database operations.
//!
//! Users are keyed by an externally supplied employee number rather than a
//! generated id, carry exactly one of two roles, and may reference another
//! user as their manager. Accounts are created at registration or demo
//! seeding and never deleted.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     user_id       INTEGER PRIMARY KEY,
//!     password_hash TEXT NOT NULL,
//!     role          TEXT NOT NULL DEFAULT 'Employee',
//!     manager_id    INTEGER REFERENCES users(user_id)
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User role, a closed enumeration.
///
/// The role arrives as free text on the registration form; deserializing
/// into this enum is the boundary validation, so an unknown role never
/// reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Role {
    /// May view and toggle status on tasks assigned to them
    Employee,

    /// May create, edit, and delete tasks and assign subordinates
    Manager,
}

impl Role {
    /// Role as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
        }
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Employee number, externally supplied at registration
    pub user_id: i64,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: Role,

    /// Manager reference (None for unmanaged users)
    pub manager_id: Option<i64>,
}

impl User {
    /// True if this account holds the Manager role.
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Employee number (must not already exist)
    pub user_id: i64,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Account role
    pub role: Role,

    /// Optional manager reference
    pub manager_id: Option<i64>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the employee number already exists (primary key
    /// violation) or the database connection fails.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, password_hash, role, manager_id)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, password_hash, role, manager_id
            "#,
        )
        .bind(data.user_id)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.manager_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by employee number
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, password_hash, role, manager_id
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users holding a given role, ordered by employee number
    ///
    /// Used by the subordinate-assignment page, which offers every
    /// Employee-role account.
    pub async fn list_by_role(pool: &SqlitePool, role: Role) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, password_hash, role, manager_id
            FROM users
            WHERE role = $1
            ORDER BY user_id
            "#,
        )
        .bind(role)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Lists the employee numbers of a manager's subordinates
    pub async fn list_subordinate_ids(
        pool: &SqlitePool,
        manager_id: i64,
    ) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM users
            WHERE manager_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(manager_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Sets a user's manager reference
    ///
    /// The assignment is unconditional: there is no check that the target
    /// holds the Employee role or is currently unmanaged.
    ///
    /// # Returns
    ///
    /// True if the target user existed and was updated, false otherwise.
    pub async fn assign_manager(
        pool: &SqlitePool,
        user_id: i64,
        manager_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET manager_id = $2
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(manager_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
