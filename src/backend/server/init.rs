/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the SQLite pool and apply migrations
 * 2. Build the application state (pool, token issuer, config)
 * 3. Create and configure the router
 *
 * A database that cannot be opened is a startup error: every endpoint
 * except the leave-type listing needs it.
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or migrations fail.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing studentleave backend server");

    let db_pool = load_database(&config.database_url).await?;
    let app_state = AppState::new(db_pool, config.clone());

    if app_state.config.allow_role_selection {
        tracing::warn!("Role selection at registration is enabled");
    }

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
