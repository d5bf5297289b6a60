//! Property-based tests

pub mod jwt_proptest;
