//! End-to-end tests: the real client against the real server
