//! Test suite for studentleave
//!
//! This module organizes all tests

pub mod common;
#[cfg(feature = "ssr")]
pub mod e2e;
pub mod property;
