//! Common test utilities and helpers

#[cfg(feature = "ssr")]
pub mod app;
#[cfg(feature = "ssr")]
pub mod auth_helpers;
pub mod mock_server;
pub mod tokens;

#[cfg(feature = "ssr")]
pub use app::{TestApp, TestResponse};
#[cfg(feature = "ssr")]
pub use auth_helpers::{create_test_user, TestUser, TEST_PASSWORD};
pub use tokens::{expired_token, fresh_token, unsigned_token};

use chrono::{Days, Utc};

/// `YYYY-MM-DD` for today plus `days` (UTC)
pub fn date_from_today(days: u64) -> String {
    let today = Utc::now().date_naive();
    today
        .checked_add_days(Days::new(days))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

/// `YYYY-MM-DD` for `days` before today (UTC)
pub fn date_before_today(days: u64) -> String {
    let today = Utc::now().date_naive();
    today
        .checked_sub_days(Days::new(days))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}
