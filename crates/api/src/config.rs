//! HTTP-facing configuration.
//!
//! # Environment Variables
//!
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `3001`)
//! - `ALLOWED_ORIGIN`: single origin allowed by CORS (default
//!   `http://localhost:5173`)
//! - `API_BASE_PATH`: prefix for every route (default `/api`)

use std::env;

use thiserror::Error;

use crate::server::ServerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiConfigError {
    #[error("Invalid PORT: '{0}'")]
    InvalidPort(String),

    #[error("Invalid API_BASE_PATH '{0}': must start with '/'")]
    InvalidBasePath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub allowed_origin: String,
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            allowed_origin: "http://localhost:5173".to_string(),
            base_path: "/api".to_string(),
        }
    }
}

impl ApiConfig {
    /// # Errors
    ///
    /// See [`ApiConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ApiConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `ApiConfigError` when `PORT` is not a valid port number or
    /// `API_BASE_PATH` is not an absolute path.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ApiConfigError::InvalidPort(value))?,
            None => defaults.server.port,
        };
        let host = read("HOST").unwrap_or(defaults.server.host);

        let base_path = match read("API_BASE_PATH") {
            Some(path) if !path.starts_with('/') => {
                return Err(ApiConfigError::InvalidBasePath(path));
            }
            Some(path) => path.trim_end_matches('/').to_string(),
            None => defaults.base_path,
        };

        Ok(Self {
            server: ServerConfig::new(host, port),
            allowed_origin: read("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            base_path,
        })
    }
}
