/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors carry their own status code and a message meant for the
 * client: missing fields, bad credentials, missing permissions, unknown ids.
 *
 * ## Infrastructure Errors
 *
 * Database, token signing, password hashing and configuration failures.
 * Their details are logged; clients only see a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use studentleave::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("Leave request not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing fields, invalid credentials)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Invalid or missing server configuration
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation, token format, serialization)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database query or connection failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Migration failure at startup
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// JWT encoding failure
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// bcrypt hashing or verification failure
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 (validation and token format)
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::ConfigError { .. }
            | Self::DatabaseError(_)
            | Self::MigrationError(_)
            | Self::TokenError(_)
            | Self::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to clients
    ///
    /// Internal failures are reduced to a generic message; the full error is
    /// logged when the response is built.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) if self.status_code().is_client_error() => err.detail().to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}
