//! Authentication primitives
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and verification
//! - [`session`]: Signed session tokens carried in a cookie
//! - [`middleware`]: Axum middleware resolving the session into a principal
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
//! - **Session Tokens**: HS256 signing with 24h / 30d ("remember me") expiry
//! - **Constant-time Comparison**: Password verification is constant-time

pub mod middleware;
pub mod password;
pub mod session;
