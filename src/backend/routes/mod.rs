//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers, fallback
//! └── api_routes.rs   - Auth, user and leave endpoints
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `POST /api/auth/register` / `POST /api/users/register`
//! - `POST /api/auth/login` / `POST /api/users/login`
//!
//! ## Authenticated (Bearer token)
//!
//! - `GET /api/auth/me`, `POST /api/auth/logout`
//! - `GET /api/users/profile`, `PUT /api/users/profile`
//! - `GET /api/leave/types`, `POST /api/leave/apply`, `GET /api/leave/my-requests`
//! - `GET /api/leave/pending`, `GET /api/leave/request/{id}`
//! - `POST /api/leave/approve/{id}`, `POST /api/leave/reject/{id}`
//!
//! # Example
//!
//! ```rust,no_run
//! use studentleave::backend::routes::create_router;
//! use studentleave::backend::server::{config::load_database, AppState, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let pool = load_database(&config.database_url).await?;
//! let router = create_router(AppState::new(pool, config));
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
