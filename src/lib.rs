//! studentleave - Student Leave Request System
//!
//! A small leave-request service for schools: students register, log in with
//! a JWT and apply for leave; teachers and admins review the requests.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and backend
//!   - Request/response bodies, roles, leave types and statuses
//!   - Email/password rules
//!   - Unverified JWT payload decoding and expiry check
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server
//!   - Registration, login, profile endpoints with bcrypt + JWT
//!   - Leave application and review workflow
//!   - SQLite persistence through sqlx
//!
//! - **`client`** - Client library and CLI support
//!   - Login/registration forms with local validation
//!   - Token storage (file or memory) and auto-login
//!   - HTTP client for the REST API
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules, the server binary and
//!   the seed binary. The client compiles without it.
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use studentleave::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use studentleave::client::{ApiClient, ClientConfig, FileTokenStore, LoginForm};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load()?;
//! let store = FileTokenStore::new(config.token_path.clone());
//! let client = ApiClient::new(config, store);
//! let response = client.login(&LoginForm::new("student1@example.com", "password123")).await?;
//! println!("Welcome, {}", response.user.display_name());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and token-format failures
//! - `backend::BackendError` for request handling, converted to JSON responses
//! - `client::ClientError` for anything the client can hit

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Client library (token storage, forms, API calls)
pub mod client;
