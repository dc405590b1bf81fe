//! Database layer: connection pool, schema application, and demo seeding.
//!
//! The backing store is a local file-backed SQLite database. The schema is
//! applied idempotently at startup (`CREATE TABLE IF NOT EXISTS`), so there
//! is no separate migration step to run before first boot.

pub mod pool;
pub mod schema;
pub mod seed;
