//! Client integration tests against a mock server

pub mod leave_client_test;
