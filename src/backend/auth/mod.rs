//! Authentication Module
//!
//! This module handles user registration, login and profile management.
//! It provides HTTP handlers for authentication endpoints and manages user
//! data and JWT tokens.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: email + password → user created (no token)
//! 2. **Login**: email + password → credentials verified → JWT token returned
//! 3. **Me / Profile**: bearer token → verified by middleware → user returned
//! 4. **Logout**: acknowledged; the client discards its token
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are HS256-signed and expire after the configured TTL
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, get_profile, login, logout, register, update_profile};
pub use sessions::{Claims, TokenIssuer};
pub use users::User;
