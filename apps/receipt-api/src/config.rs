//! Receipt API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Receipt API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: IpAddr,

    /// Origin allowed to call the API from a browser (the bill view dev server)
    pub cors_origin: String,

    /// Largest accepted upload body in bytes (default: 10MB)
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 8080,
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            cors_origin: "http://localhost:5173".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            port: parse_or(&lookup, "RECEIPT_API_PORT", defaults.port)?,
            bind_addr: parse_or(&lookup, "RECEIPT_API_BIND", defaults.bind_addr)?,
            cors_origin: lookup("RECEIPT_API_CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            max_upload_bytes: parse_or(
                &lookup,
                "RECEIPT_API_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            )?,
        };

        if config.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue(
                "RECEIPT_API_MAX_UPLOAD_BYTES".to_string(),
            ));
        }

        if !config.cors_origin.starts_with("http://") && !config.cors_origin.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue("RECEIPT_API_CORS_ORIGIN".to_string()));
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_env_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("RECEIPT_API_PORT", "9090"),
            ("RECEIPT_API_BIND", "127.0.0.1"),
            ("RECEIPT_API_CORS_ORIGIN", "https://bills.example.com"),
            ("RECEIPT_API_MAX_UPLOAD_BYTES", "2048"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.cors_origin, "https://bills.example.com");
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup_from(&[("RECEIPT_API_PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for RECEIPT_API_PORT");

        assert!(ApiConfig::from_lookup(lookup_from(&[("RECEIPT_API_MAX_UPLOAD_BYTES", "0")]))
            .is_err());
        assert!(ApiConfig::from_lookup(lookup_from(&[("RECEIPT_API_CORS_ORIGIN", "*")])).is_err());
    }
}
