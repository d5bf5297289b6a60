//! API endpoint integration tests

pub mod leave_test;
