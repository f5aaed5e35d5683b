use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "SUBTRACK_API_URL";
pub const DEFAULT_API_BASE: &str = "http://localhost:5500/api/v1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Inclusive length, in days, of the renewal-urgency window.
pub const RENEWAL_WINDOW_DAYS: i64 = 7;

/// Number of records shown in the dashboard's "recent subscriptions" panel.
pub const RECENT_LIMIT: usize = 6;

pub const SIGN_IN_PATH: &str = "auth/sign-in";
pub const SIGN_UP_PATH: &str = "auth/sign-up";
pub const SUBSCRIPTIONS_PATH: &str = "subscriptions";

pub fn user_subscriptions_path(user_id: &str) -> String {
    format!("subscriptions/user/{}", user_id)
}

pub fn user_path(user_id: &str) -> String {
    format!("users/{}", user_id)
}

/// Base URL from the environment, falling back to the local development server.
pub fn default_api_base() -> String {
    env::var(API_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn default_session_path() -> PathBuf {
    if let Some(config) = dirs::config_dir() {
        config.join("subtrack-sdk").join("session.json")
    } else {
        PathBuf::from(".subtrack-sdk").join("session.json")
    }
}
