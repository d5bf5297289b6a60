//! Shared Module
//!
//! This module contains types and helpers that are shared between the client
//! and the backend: the JSON bodies of every endpoint, the credential rules
//! both sides enforce, and the unverified JWT payload check the client uses
//! to decide whether a stored token is still usable.
//!
//! Nothing in here performs I/O.

/// Shared error types
pub mod error;

/// JWT payload decoding and expiry checks
pub mod jwt;

/// Email and password rules
pub mod validation;

/// Request/response bodies and domain enums
pub mod types;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use jwt::{decode_payload, is_jwt_valid, is_jwt_valid_now, TokenPayload};
pub use types::{LeaveStatus, LeaveType, Role, UserResponse};
