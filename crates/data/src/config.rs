//! Configuration for the remote DEX API.

use std::env;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SWAPBOARD_API_URL";

/// Default base URL when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/dex";

/// Connection settings for [`crate::DexApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the DEX API, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Builds a config from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var(API_URL_ENV) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}
