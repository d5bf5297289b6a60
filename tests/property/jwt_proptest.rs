//! Property-based tests for client-side token expiry checks

use proptest::prelude::*;
use serde_json::json;

use studentleave::shared::jwt::{decode_payload, is_jwt_valid};

use crate::common::unsigned_token;

proptest! {
    /// A token is valid exactly when its `exp` lies after `now`
    #[test]
    fn prop_expiry_decides_validity(exp in -1_000_000_000i64..4_000_000_000i64, now in 0i64..3_000_000_000i64) {
        let token = unsigned_token(&json!({ "sub": "u", "exp": exp }));
        prop_assert_eq!(is_jwt_valid(Some(token.as_str()), now), exp > now);
    }

    /// The payload decodes back to the claims it was built from
    #[test]
    fn prop_payload_preserves_exp(exp in any::<i32>(), email in "[a-z]{1,12}@[a-z]{1,8}\\.com") {
        let token = unsigned_token(&json!({ "exp": exp, "email": email }));
        let payload = decode_payload(&token).unwrap();
        prop_assert_eq!(payload.exp(), Some(i64::from(exp)));
    }

    /// Random text is never accepted and never panics
    #[test]
    fn prop_garbage_is_invalid(token in "[A-Za-z0-9_\\-]{0,80}") {
        prop_assert!(!is_jwt_valid(Some(token.as_str()), 0));
    }

    /// A token without `exp` is never valid
    #[test]
    fn prop_missing_exp_is_invalid(sub in "[a-z0-9-]{0,36}", now in any::<i64>()) {
        let token = unsigned_token(&json!({ "sub": sub }));
        prop_assert!(!is_jwt_valid(Some(token.as_str()), now));
    }
}
