//! In-process application for API tests
//!
//! Builds the full router over a fresh in-memory database and drives it
//! with `tower::ServiceExt::oneshot`, so no port is bound.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use studentleave::backend::routes::create_router;
use studentleave::backend::server::config::load_memory_database;
use studentleave::backend::server::{AppState, ServerConfig};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Status and decoded JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the body, or "" when absent
    pub fn message(&self) -> &str {
        self.body.get("message").and_then(Value::as_str).unwrap_or_default()
    }
}

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Start from the test configuration and let the caller adjust it
    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let mut config = ServerConfig::new("sqlite::memory:", TEST_SECRET);
        config.bcrypt_cost = 4;
        adjust(&mut config);

        let pool = load_memory_database()
            .await
            .expect("Failed to create in-memory database");
        let state = AppState::new(pool, config);
        let router = create_router(state.clone());

        Self { state, router }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.db_pool
    }

    /// A router clone, for serving on a real socket
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }
}
