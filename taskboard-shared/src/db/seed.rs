//! Demo account seeding.
//!
//! Recreates the bootstrap data the service has always shipped with: a
//! manager (employee number 101) and one employee (number 1) reporting to
//! them, both with the password `pass`. Intended for local development;
//! gated behind configuration in the server binary.

use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::{hash_password, PasswordError};
use crate::models::user::{CreateUser, Role, User};

/// Demo manager employee number
pub const DEMO_MANAGER_ID: i64 = 101;

/// Demo employee number
pub const DEMO_EMPLOYEE_ID: i64 = 1;

const DEMO_PASSWORD: &str = "pass";

/// Error type for seeding
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Failed to hash the demo password
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database error
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Ensures the demo manager and employee accounts exist
///
/// Idempotent: accounts that already exist are left untouched, so this can
/// run on every boot.
pub async fn ensure_demo_accounts(pool: &SqlitePool) -> Result<(), SeedError> {
    if User::find_by_id(pool, DEMO_MANAGER_ID).await?.is_none() {
        User::create(
            pool,
            CreateUser {
                user_id: DEMO_MANAGER_ID,
                password_hash: hash_password(DEMO_PASSWORD)?,
                role: Role::Manager,
                manager_id: None,
            },
        )
        .await?;
        info!(user_id = DEMO_MANAGER_ID, "Seeded demo manager account");
    }

    if User::find_by_id(pool, DEMO_EMPLOYEE_ID).await?.is_none() {
        User::create(
            pool,
            CreateUser {
                user_id: DEMO_EMPLOYEE_ID,
                password_hash: hash_password(DEMO_PASSWORD)?,
                role: Role::Employee,
                manager_id: Some(DEMO_MANAGER_ID),
            },
        )
        .await?;
        info!(user_id = DEMO_EMPLOYEE_ID, "Seeded demo employee account");
    }

    Ok(())
}
