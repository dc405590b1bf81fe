//! # Taskboard Web Server Library
//!
//! This library provides the Taskboard HTTP server: a small
//! task-assignment app where managers create tasks for their subordinates
//! and employees view and complete them.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `flash`: One-shot flash messages carried in a cookie
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod routes;
