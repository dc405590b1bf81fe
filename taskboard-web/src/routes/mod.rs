//! Route handlers organized by resource:
//!
//! - `health`: Health check endpoint
//! - `pages`: Home and profile pages
//! - `auth`: Registration, login, logout
//! - `subordinates`: Subordinate listing and assignment
//! - `tasks`: Task CRUD, visibility, and status toggling

pub mod auth;
pub mod health;
pub mod pages;
pub mod subordinates;
pub mod tasks;
