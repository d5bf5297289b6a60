//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication and profile
//! endpoints. Request and response bodies live in `shared::types`, since
//! the client decodes the same shapes.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── me.rs        - Get current user handler
//! ├── logout.rs    - Logout acknowledgement
//! └── profile.rs   - Profile read/update handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register, POST /api/users/register
//! - **`login`** - POST /api/auth/login, POST /api/users/login
//! - **`get_me`** - GET /api/auth/me
//! - **`logout`** - POST /api/auth/logout
//! - **`get_profile`** / **`update_profile`** - GET/PUT /api/users/profile

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Logout handler
pub mod logout;

/// Profile handlers
pub mod profile;

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use profile::{get_profile, update_profile};
pub use register::register;
