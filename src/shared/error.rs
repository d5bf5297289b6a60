//! Shared Error Types
//!
//! This module defines error types that are shared between the client and backend.
//! These errors represent common failure cases that can occur in both contexts.
//!
//! # Error Categories
//!
//! - `ValidationError` - Input validation failures (email, password, dates)
//! - `TokenError` - Malformed JWT strings
//!
//! # Usage
//!
//! ```rust
//! use studentleave::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email format");
//! assert!(error.to_string().contains("email"));
//! ```
use thiserror::Error;

/// Shared error types that can occur in both client and backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The token could not be split or decoded
    #[error("Token error: {message}")]
    TokenError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new token error
    pub fn token(message: impl Into<String>) -> Self {
        Self::TokenError {
            message: message.into(),
        }
    }

    /// Message without the category prefix, suitable for API bodies
    pub fn detail(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } | Self::TokenError { message } => message,
        }
    }
}
