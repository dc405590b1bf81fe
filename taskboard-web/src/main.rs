//! # Taskboard Web Server
//!
//! HTTP server for the taskboard: session-authenticated registration and
//! login, task CRUD for managers, and task visibility and status toggling
//! for employees.
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p taskboard-web
//! ```

use taskboard_web::app::{build_router, AppState};
use taskboard_web::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_web=debug,taskboard_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskboard web server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = taskboard_shared::db::pool::create_pool(taskboard_shared::db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    taskboard_shared::db::schema::ensure_schema(&pool).await?;

    if config.seed_demo {
        taskboard_shared::db::seed::ensure_demo_accounts(&pool).await?;
    }

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
