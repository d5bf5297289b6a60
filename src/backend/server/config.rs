/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by the binary before this runs), with defaults for local development.
 *
 * | Variable                   | Default                     |
 * |----------------------------|-----------------------------|
 * | `DATABASE_URL`             | `sqlite://studentleave.db`  |
 * | `JWT_SECRET`               | required in release builds  |
 * | `JWT_ACCESS_TOKEN_EXPIRES` | `3600` (seconds, max 1 yr)  |
 * | `HOST`                     | `0.0.0.0`                   |
 * | `PORT`                     | `5000`                      |
 * | `BCRYPT_COST`              | `12`                        |
 * | `ALLOW_ROLE_SELECTION`     | `false`                     |
 */

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::backend::error::BackendError;

const DEFAULT_DATABASE_URL: &str = "sqlite://studentleave.db";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
/// One year; longer lifetimes are refused
const MAX_TOKEN_TTL_SECS: u64 = 366 * 24 * 3600;
const DEFAULT_PORT: u16 = 5000;
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Runtime configuration of the HTTP service
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    /// Let registration requests pick their own role
    pub allow_role_selection: bool,
}

impl ServerConfig {
    /// Configuration with defaults for everything but the database and secret
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_role_selection: false,
        }
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BackendError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(BackendError::config("JWT_SECRET must be set")),
        };

        let mut config = Self::new(database_url, jwt_secret);

        if let Some(ttl) = lookup("JWT_ACCESS_TOKEN_EXPIRES") {
            let secs: u64 = parse_var("JWT_ACCESS_TOKEN_EXPIRES", &ttl)?;
            if !(1..=MAX_TOKEN_TTL_SECS).contains(&secs) {
                return Err(BackendError::config(format!(
                    "JWT_ACCESS_TOKEN_EXPIRES must be between 1 and {} seconds",
                    MAX_TOKEN_TTL_SECS
                )));
            }
            config.token_ttl = Duration::from_secs(secs);
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_var("PORT", &port)?;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            let cost: u32 = parse_var("BCRYPT_COST", &cost)?;
            if !(4..=31).contains(&cost) {
                return Err(BackendError::config("BCRYPT_COST must be between 4 and 31"));
            }
            config.bcrypt_cost = cost;
        }
        if let Some(flag) = lookup("ALLOW_ROLE_SELECTION") {
            config.allow_role_selection = matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Address the listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T, BackendError> {
    value
        .trim()
        .parse()
        .map_err(|_| BackendError::config(format!("{} has an invalid value: {}", name, value)))
}

/// Open the database pool and run migrations
///
/// The database file is created if it does not exist yet.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// A single connection is kept alive for the lifetime of the pool, since
/// every new SQLite memory connection would see an empty database.
pub async fn load_memory_database() -> Result<SqlitePool, BackendError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), BackendError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
