//! Client configuration
//!
//! Defaults, then `<config dir>/studentleave/client.toml` if present, then
//! environment variables:
//!
//! | Variable                  | Field        |
//! |---------------------------|--------------|
//! | `CLIENT_API_URL`          | `base_url`   |
//! | `STUDENTLEAVE_TOKEN_PATH` | `token_path` |
//! | `STUDENTLEAVE_ENDPOINTS`  | `endpoints`  |
//!
//! ```toml
//! base_url = "http://school.example:5000"
//! endpoints = "users"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::error::ClientError;

/// Default server URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const APP_DIR: &str = "studentleave";

/// Which pair of login/register routes the client talks to
///
/// Both are served by the backend; `Users` exists for older deployments
/// that only exposed `/api/users/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointSet {
    #[default]
    Auth,
    Users,
}

impl EndpointSet {
    pub fn login_path(&self) -> &'static str {
        match self {
            Self::Auth => "/api/auth/login",
            Self::Users => "/api/users/login",
        }
    }

    pub fn register_path(&self) -> &'static str {
        match self {
            Self::Auth => "/api/auth/register",
            Self::Users => "/api/users/register",
        }
    }
}

impl std::str::FromStr for EndpointSet {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auth" => Ok(Self::Auth),
            "users" => Ok(Self::Users),
            other => Err(ClientError::Config(format!("unknown endpoint set: {}", other))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Where the JWT is kept between runs
    pub token_path: PathBuf,
    pub endpoints: EndpointSet,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_path: Self::default_token_path(),
            endpoints: EndpointSet::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url`, other fields defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// `<config dir>/studentleave/client.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("client.toml"))
    }

    /// `<data dir>/studentleave/jwt`, or `./.studentleave/jwt` without a data dir
    pub fn default_token_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".").join(format!(".{}", APP_DIR)))
            .join(APP_DIR)
            .join("jwt")
    }

    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self, ClientError> {
        Self::load_from(Self::default_config_path().as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from an optional TOML file, then apply overrides from `lookup`
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_from<F>(path: Option<&Path>, lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) if path.exists() => {
                tracing::debug!("Reading client config from {}", path.display());
                let text = std::fs::read_to_string(path)
                    .map_err(|e| ClientError::Config(format!("cannot read {}: {}", path.display(), e)))?;
                Self::from_toml_str(&text)?
            }
            _ => Self::default(),
        };

        if let Some(url) = lookup("CLIENT_API_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(token_path) = lookup("STUDENTLEAVE_TOKEN_PATH").filter(|v| !v.trim().is_empty()) {
            config.token_path = PathBuf::from(token_path);
        }
        if let Some(endpoints) = lookup("STUDENTLEAVE_ENDPOINTS") {
            config.endpoints = endpoints.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!("invalid URL: {}", self.base_url)));
        }
        Ok(())
    }

    /// Get the full URL for an API path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
