//! Configuration read from the process environment
//!
//! These tests mutate environment variables, so they run serially.

use pretty_assertions::assert_eq;
use serial_test::serial;

use studentleave::client::{ClientConfig, EndpointSet};

/// Set variables for the duration of a test and remove them afterwards
struct EnvGuard(Vec<&'static str>);

impl EnvGuard {
    fn set(pairs: &[(&'static str, &str)]) -> Self {
        for (key, value) in pairs {
            std::env::set_var(key, value);
        }
        Self(pairs.iter().map(|(key, _)| *key).collect())
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.0 {
            std::env::remove_var(key);
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
#[serial]
fn test_client_env_overrides() {
    let _env = EnvGuard::set(&[
        ("CLIENT_API_URL", "https://leave.school.example/"),
        ("STUDENTLEAVE_TOKEN_PATH", "/tmp/studentleave-test/jwt"),
        ("STUDENTLEAVE_ENDPOINTS", "users"),
    ]);

    let config = ClientConfig::load_from(None, env_lookup).unwrap();

    assert_eq!(config.base_url, "https://leave.school.example/");
    assert_eq!(config.api_url("/api/users/login"), "https://leave.school.example/api/users/login");
    assert_eq!(config.token_path, std::path::PathBuf::from("/tmp/studentleave-test/jwt"));
    assert_eq!(config.endpoints, EndpointSet::Users);
}

#[test]
#[serial]
fn test_client_env_rejects_bad_url() {
    let _env = EnvGuard::set(&[("CLIENT_API_URL", "ftp://leave.school.example")]);

    assert!(ClientConfig::load_from(None, env_lookup).is_err());
}

#[cfg(feature = "ssr")]
#[test]
#[serial]
fn test_server_env() {
    use studentleave::backend::server::ServerConfig;

    let _env = EnvGuard::set(&[
        ("JWT_SECRET", "from-the-environment"),
        ("PORT", "8080"),
        ("HOST", "0.0.0.0"),
        ("BCRYPT_COST", "10"),
        ("ALLOW_ROLE_SELECTION", "true"),
        ("JWT_ACCESS_TOKEN_EXPIRES", "600"),
    ]);

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.jwt_secret, "from-the-environment");
    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.bcrypt_cost, 10);
    assert!(config.allow_role_selection);
    assert_eq!(config.token_ttl.as_secs(), 600);
}

#[cfg(feature = "ssr")]
#[test]
#[serial]
fn test_server_env_rejects_bad_port() {
    use studentleave::backend::server::ServerConfig;

    let _env = EnvGuard::set(&[("JWT_SECRET", "s"), ("PORT", "eighty")]);

    assert!(ServerConfig::from_env().is_err());
}
