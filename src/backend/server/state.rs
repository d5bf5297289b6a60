/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and safe to share: the SQLite pool is
 * internally reference counted, the token issuer holds its keys in `Arc`s,
 * and the configuration is immutable behind an `Arc`.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // query the database
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::server::config::ServerConfig;

/// Central state container shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// JWT signing and verification
    pub tokens: TokenIssuer,

    /// Settings handlers consult at request time (bcrypt cost, role selection)
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: ServerConfig) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl);
        Self {
            db_pool,
            tokens,
            config: Arc::new(config),
        }
    }
}

/// Lets handlers extract `State<SqlitePool>` directly
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Lets handlers extract `State<TokenIssuer>` directly
impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// State over a fresh in-memory database with a cheap bcrypt cost
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let pool = crate::backend::server::config::load_memory_database()
        .await
        .expect("in-memory database");
    let mut config = ServerConfig::new("sqlite::memory:", "test-secret");
    config.bcrypt_cost = 4;
    AppState::new(pool, config)
}
