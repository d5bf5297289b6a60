//! Unsigned JWTs for client-side tests
//!
//! The client never checks signatures, so a header, a payload and a dummy
//! signature are enough.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::{json, Value};

/// Token whose payload is `claims`
pub fn unsigned_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

/// Token that expires in an hour
pub fn fresh_token() -> String {
    unsigned_token(&json!({
        "sub": "00000000-0000-0000-0000-000000000001",
        "email": "student1@example.com",
        "role": "student",
        "exp": Utc::now().timestamp() + 3600,
    }))
}

/// Token that expired an hour ago
pub fn expired_token() -> String {
    unsigned_token(&json!({
        "sub": "00000000-0000-0000-0000-000000000001",
        "exp": Utc::now().timestamp() - 3600,
    }))
}
