//! Database models for Taskboard
//!
//! This module contains all database models and their CRUD operations.
//!
//! # Models
//!
//! - `user`: Employee-number keyed accounts with roles and manager links
//! - `task`: Assigned tasks with status and due dates

pub mod task;
pub mod user;
