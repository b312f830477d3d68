//! Gateway configuration.
//!
//! # Environment Variables
//!
//! - `TODO_API_BASE_URL` (default `http://localhost:3001/api`)
//! - `TODO_API_TIMEOUT_SECS`: per-request timeout; unset means the transport
//!   default

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayConfigError {
    #[error("Invalid TODO_API_TIMEOUT_SECS: '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GatewayConfig {
    /// Trailing slashes are dropped so paths can be appended directly.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// # Errors
    ///
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `GatewayConfigError::InvalidTimeout` when the timeout is not a
    /// whole number of seconds.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GatewayConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let config = read("TODO_API_BASE_URL").map_or_else(Self::default, Self::with_base_url);

        match read("TODO_API_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .map(|seconds| config.with_timeout(Duration::from_secs(seconds)))
                .map_err(|_| GatewayConfigError::InvalidTimeout(value)),
            None => Ok(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_point_at_local_server() {
        let config = GatewayConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout, None);
    }

    #[rstest]
    fn reads_base_url_and_timeout() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "TODO_API_BASE_URL" => Some("https://todo.example.com/api/".to_string()),
            "TODO_API_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.base_url, "https://todo.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[rstest]
    fn rejects_non_numeric_timeout() {
        let result = GatewayConfig::from_lookup(|key| {
            (key == "TODO_API_TIMEOUT_SECS").then(|| "soon".to_string())
        });

        assert_eq!(
            result,
            Err(GatewayConfigError::InvalidTimeout("soon".to_string()))
        );
    }
}
