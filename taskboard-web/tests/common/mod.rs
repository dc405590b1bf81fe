/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database with schema applied
/// - Router construction with test configuration
/// - Form-post and cookie helpers for driving the session flow

use axum::body::Body;
use axum::http::{header, Request, Response};
use sqlx::SqlitePool;
use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
use taskboard_shared::db::schema::ensure_schema;
use taskboard_web::app::{build_router, AppState};
use taskboard_web::config::{Config, HttpConfig, SessionConfig};
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(DatabaseConfig::in_memory()).await?;
        ensure_schema(&db).await?;

        let config = Config {
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: taskboard_web::config::DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: "integration-test-secret-0123456789abcdef".to_string(),
            },
            seed_demo: false,
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a GET request, optionally with a session cookie
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(Body::empty()).unwrap();

        self.app.clone().call(request).await.unwrap()
    }

    /// Posts an application/x-www-form-urlencoded body, optionally with a
    /// session cookie
    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        self.app.clone().call(request).await.unwrap()
    }

    /// Registers an account through the public endpoint
    pub async fn register(
        &self,
        id: i64,
        password: &str,
        role: &str,
        manager_id: Option<i64>,
    ) -> Response<Body> {
        let manager_id = manager_id.map(|m| m.to_string()).unwrap_or_default();
        let body = format!(
            "id={}&password={}&role={}&manager_id={}",
            id, password, role, manager_id
        );
        self.post_form("/register", &body, None).await
    }

    /// Logs in and returns the session cookie to send on later requests
    ///
    /// Panics if login did not produce a session cookie, since every caller
    /// expects credentials it just registered to work.
    pub async fn login(&self, id: i64, password: &str) -> String {
        let body = format!("id={}&password={}", id, password);
        let response = self.post_form("/login", &body, None).await;

        session_cookie(&response).expect("login should set a session cookie")
    }

    /// Registers an account and returns a logged-in session cookie
    pub async fn register_and_login(
        &self,
        id: i64,
        password: &str,
        role: &str,
        manager_id: Option<i64>,
    ) -> String {
        let response = self.register(id, password, role, manager_id).await;
        // Registration logs the account in directly.
        session_cookie(&response).expect("registration should set a session cookie")
    }
}

/// Extracts the session cookie from a response's Set-Cookie headers
///
/// Returns a `name=value` pair ready to send back in a Cookie header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    cookie_pair(response, "session")
}

/// Extracts the flash cookie pair, if the response set one with a value
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    cookie_pair(response, "flash").filter(|pair| pair != "flash=")
}

fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.to_string())
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Location header of a redirect response
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should be a redirect")
        .to_str()
        .unwrap()
}
