//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Client configuration for the HTTP API implementation.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the signup backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// `SIGNUP_API_BASE_URL` — backend base URL.
    /// `SIGNUP_API_TIMEOUT_SECS` — request timeout in seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SIGNUP_API_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(raw) = std::env::var("SIGNUP_API_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SIGNUP_API_TIMEOUT_SECS".to_string(),
                message: format!("expected an integer number of seconds, got {raw:?}"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
