//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes, plus the
//!   `AuthUser` extractor handlers use to read the authenticated user.
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use studentleave::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/api/auth/me", get(get_me))
//!     .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthUser, AuthenticatedUser};
