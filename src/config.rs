//! Runtime configuration resolved once at startup.

use std::env;
use std::time::Duration;

/// Base endpoint used when `API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Fixed request timeout for all directory requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base endpoint of the directory backend.
    pub base_url: String,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// `API_BASE_URL` overrides the default base endpoint. A trailing slash
    /// is trimmed so path joining stays predictable.
    pub fn from_env() -> Self {
        let base_url = env::var("API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
