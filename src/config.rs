//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;

use thiserror::Error;

/// Default HTTP port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8080;

/// Default cross-origin policy when `FRONTEND_URL` is unset
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";

// == Config Error ==
/// Errors raised while reading configuration. All of them are fatal at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL of the key-value store (`redis://...` or `memory://`)
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Externally advertised base URL, only used for logging
    pub backend_url: String,
    /// Value of `Access-Control-Allow-Origin`; `*` allows any origin
    pub allowed_origin: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Store connection URL (required)
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `BACKEND_URL` - Advertised base URL (default: `http://localhost:<port>`)
    /// - `FRONTEND_URL` - Allowed cross-origin source (default: `*`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let redis_url = get("REDIS_URL").ok_or(ConfigError::Missing("REDIS_URL"))?;

        let server_port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let backend_url =
            get("BACKEND_URL").unwrap_or_else(|| format!("http://localhost:{}", server_port));

        let allowed_origin =
            get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        Ok(Self {
            redis_url,
            server_port,
            backend_url,
            allowed_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("REDIS_URL", "redis://localhost")]))
            .unwrap();
        assert_eq!(config.redis_url, "redis://localhost");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.backend_url, "http://localhost:8080");
        assert_eq!(config.allowed_origin, "*");
    }

    #[test]
    fn test_backend_url_follows_port() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://localhost"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.backend_url, "http://localhost:9000");
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379/1"),
            ("PORT", "3000"),
            ("BACKEND_URL", "https://clip.example.com"),
            ("FRONTEND_URL", "https://app.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://clip.example.com");
        assert_eq!(config.allowed_origin, "https://app.example.com");
    }

    #[test]
    fn test_missing_redis_url() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "3000")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("REDIS_URL"));
    }

    #[test]
    fn test_empty_redis_url_is_missing() {
        let err = Config::from_lookup(lookup_from(&[("REDIS_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("REDIS_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://localhost"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }
}
