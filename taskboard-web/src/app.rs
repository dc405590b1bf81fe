//! Application state and router builder.
//!
//! # Route Map
//!
//! ```text
//! /
//! ├── /health                   # Health check (public)
//! ├── /register                 # GET page payload, POST form (public)
//! ├── /login                    # GET page payload, POST form (public)
//! ├── /logout                   # Clear session (authenticated)
//! ├── /profile                  # Current principal (authenticated)
//! ├── /subordinate              # Employee list (authenticated)
//! ├── /subordinate/:id/assign   # Assign to acting user (authenticated)
//! ├── /tasks                    # Visible task list (authenticated)
//! └── /task/...                 # Create/detail/edit/status/delete (authenticated)
//! ```
//!
//! Authenticated routes sit behind the session middleware, which resolves
//! the session cookie into a `CurrentUser` extension or redirects to
//! `/login`.

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use taskboard_shared::auth::middleware::{session_auth_middleware, AuthError};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no session required
    let public_routes = Router::new()
        .route("/", get(routes::pages::home))
        .route("/health", get(routes::health::health_check))
        .route("/register", get(routes::auth::register_page))
        .route("/register", post(routes::auth::register))
        .route("/login", get(routes::auth::login_page))
        .route("/login", post(routes::auth::login));

    // Everything else requires an authenticated session
    let protected_routes = Router::new()
        .route("/logout", get(routes::auth::logout))
        .route("/profile", get(routes::pages::profile))
        .route("/subordinate", get(routes::subordinates::list_employees))
        .route(
            "/subordinate/:user_id/assign",
            get(routes::subordinates::assign),
        )
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/task/create", get(routes::tasks::create_task_page))
        .route("/task/create", post(routes::tasks::create_task))
        .route("/task/:task_no", get(routes::tasks::task_detail))
        .route("/task/:task_no/edit", get(routes::tasks::edit_task_page))
        .route("/task/:task_no/edit", post(routes::tasks::edit_task))
        .route("/task/:task_no/status", get(routes::tasks::toggle_status))
        .route("/task/:task_no/delete", get(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Thin wrapper handing the pool and secret to the shared middleware.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    session_auth_middleware(
        state.db.clone(),
        state.session_secret().to_string(),
        req,
        next,
    )
    .await
}
