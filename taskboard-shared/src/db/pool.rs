//! Database connection pool management.
//!
//! Provides a SQLite connection pool built on sqlx, with a startup health
//! check and sensible defaults for a small synchronous-CRUD workload.
//!
//! # Example
//!
//! ```no_run
//! use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "sqlite://taskboard.db".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let pool = create_pool(config).await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await?;
//!     assert_eq!(row.0, 1);
//!     Ok(())
//! }
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. "sqlite://taskboard.db" or "sqlite::memory:")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// SQLite serializes writes internally, so a small pool is plenty.
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,

    /// Whether to create the database file if it does not exist
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://taskboard.db".to_string(),
            max_connections: 5,
            connect_timeout_seconds: 30,
            create_if_missing: true,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for an in-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            // A second connection would see a different empty database.
            max_connections: 1,
            ..Default::default()
        }
    }
}

/// Creates and initializes a SQLite connection pool
///
/// This function:
/// 1. Creates a pool with the specified configuration
/// 2. Performs a health check to verify database connectivity
/// 3. Returns an error if the database is unreachable
///
/// # Errors
///
/// Returns an error if the database URL is invalid, the database file
/// cannot be opened or created, or the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(connect_options)
        .await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// Executes a simple query to verify the database is reachable and responding.
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Gracefully closes the connection pool
///
/// Call during shutdown so outstanding connections are released cleanly.
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "sqlite://taskboard.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout_seconds, 30);
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_in_memory_config_is_single_connection() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
    }

    #[tokio::test]
    async fn test_create_pool_in_memory() {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("in-memory pool should connect");

        health_check(&pool).await.expect("health check should pass");
        close_pool(pool).await;
    }
}
