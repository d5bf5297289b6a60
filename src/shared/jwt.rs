//! JWT payload inspection
//!
//! Client-side helpers that read the claims of a JSON Web Token without
//! verifying its signature. They answer one question for the login flow:
//! is the token we hold still worth sending? Signature verification only
//! happens on the server (`backend::auth::sessions`).
//!
//! A token is considered valid here when its payload segment decodes to a
//! JSON object carrying a numeric `exp` claim that lies in the future.
//! Anything else (missing token, wrong segment count, bad base64, bad JSON,
//! missing or non-numeric `exp`, past `exp`) is invalid.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::shared::error::SharedError;

/// Decoded (unverified) JWT claims
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload {
    claims: Map<String, Value>,
}

impl TokenPayload {
    /// Expiration time as a Unix timestamp, if present and numeric
    pub fn exp(&self) -> Option<i64> {
        numeric_claim(self.claims.get("exp")?)
    }

    /// Issued-at time as a Unix timestamp, if present and numeric
    pub fn iat(&self) -> Option<i64> {
        numeric_claim(self.claims.get("iat")?)
    }

    /// Subject (user id)
    pub fn sub(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.get("email").and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.claims.get("role").and_then(Value::as_str)
    }

    /// Raw claim lookup
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

/// Integer value of a numeric claim; fractional numbers do not count
fn numeric_claim(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if value.as_u64().is_some() {
        return Some(i64::MAX);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Decode the payload segment of a JWT
///
/// The segment is base64url as the JWT format requires. Trailing `=`
/// padding is tolerated, and standard-alphabet input is accepted as a
/// fallback for tokens produced by lenient encoders.
pub fn decode_payload(token: &str) -> Result<TokenPayload, SharedError> {
    let mut segments = token.split('.');
    let _header = segments.next();
    let payload = segments
        .next()
        .ok_or_else(|| SharedError::token("token has no payload segment"))?;

    let trimmed = payload.trim_end_matches('=');
    if trimmed.is_empty() {
        return Err(SharedError::token("payload segment is empty"));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| SharedError::token(format!("payload is not base64: {}", e)))?;

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| SharedError::token(format!("payload is not JSON: {}", e)))?;

    match value {
        Value::Object(claims) => Ok(TokenPayload { claims }),
        _ => Err(SharedError::token("payload is not a JSON object")),
    }
}

/// Check a token's expiry against `now` (Unix seconds)
pub fn is_jwt_valid(token: Option<&str>, now: i64) -> bool {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return false;
    };

    match decode_payload(token) {
        Ok(payload) => payload.exp().is_some_and(|exp| exp > now),
        Err(e) => {
            tracing::debug!("Rejecting token: {}", e);
            false
        }
    }
}

/// Check a token's expiry against the current wall-clock time
pub fn is_jwt_valid_now(token: Option<&str>) -> bool {
    is_jwt_valid(token, Utc::now().timestamp())
}

/// Remaining lifetime of a valid token, `None` if it is invalid or expired
pub fn expires_in(token: &str, now: i64) -> Option<Duration> {
    let exp = decode_payload(token).ok()?.exp()?;
    let left = u64::try_from(exp.checked_sub(now)?).ok()?;
    (left > 0).then(|| Duration::from_secs(left))
}
