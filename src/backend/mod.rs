//! Backend Module
//!
//! This module contains all server-side code for the student leave service:
//! an Axum HTTP server with JWT authentication over a SQLite store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, JWT tokens, register/login/profile handlers
//! - **`leave`** - Leave applications and the review workflow
//! - **`middleware`** - Bearer-token authentication
//! - **`seed`** - Initial accounts for a fresh database
//! - **`error`** - Backend error type and its JSON response
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── leave/          - Leave requests
//! ├── middleware/     - Request middleware
//! ├── seed.rs         - Seed accounts
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Every error becomes a JSON body
//! `{"message": ..., "status": ...}` with the matching status code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Leave applications and review
pub mod leave;

/// Initial data for new databases
pub mod seed;

pub use error::BackendError;
pub use server::create_app;
