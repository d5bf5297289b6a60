//! Client error type.

use thiserror::Error;

use crate::shared::error::SharedError;

/// Everything the client library can fail with
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected locally, before any request was sent
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's, or a default
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The server returned a token that fails the local expiry check
    #[error("Received an invalid token, please log in again")]
    InvalidToken,

    #[error("Not logged in")]
    NotLoggedIn,

    /// Token file could not be written or removed
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Api { message, .. } => message.clone(),
            Self::Network(_) => "Network error, please try again later".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<SharedError> for ClientError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
            SharedError::TokenError { .. } => Self::InvalidToken,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
