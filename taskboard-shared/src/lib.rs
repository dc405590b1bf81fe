//! # Taskboard Shared Library
//!
//! This crate contains the types, persistence layer, and authentication
//! primitives shared by the Taskboard web server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models (`User`, `Task`) and their CRUD operations
//! - `auth`: Password hashing, session tokens, and request middleware
//! - `db`: Connection pool, schema application, and demo seeding

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
