//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5513";
pub const DEFAULT_STALE_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without a trailing slash (e.g. `"http://localhost:5513"`).
    pub base_url: String,
    /// Bearer token to seed the session with, if one was supplied.
    pub token: Option<String>,
    /// How long list/detail query results are served from cache.
    pub stale_time: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: None,
            stale_time: Duration::from_secs(DEFAULT_STALE_SECS),
        }
    }
}

impl ClientConfig {
    /// Build a config for `base_url` with every other field defaulted.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), ..Self::default() }
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BOOKDESK_BASE_URL`: default `http://localhost:5513`
    /// - `BOOKDESK_TOKEN`: bearer token; empty values are ignored
    /// - `BOOKDESK_STALE_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("BOOKDESK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let token = std::env::var("BOOKDESK_TOKEN")
            .ok()
            .filter(|s| !s.is_empty());
        let stale_secs = env_parse_u64("BOOKDESK_STALE_SECS", DEFAULT_STALE_SECS);

        Self {
            base_url: normalize_base_url(&base_url),
            token,
            stale_time: Duration::from_secs(stale_secs),
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
