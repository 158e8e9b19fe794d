//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use shrinkshield_core::DEFAULT_MAX_UPLOAD_BYTES;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to listen on
    pub bind_addr: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Largest accepted receipt upload in bytes (default: 10MB)
    pub max_upload_bytes: usize,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `load()` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            bind_addr: get("BIND_ADDR", "0.0.0.0")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))?,

            port: get("PORT", "8000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: PathBuf::from(get("DATABASE_PATH", "./shrinkshield.db")),

            db_max_connections: get("DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            max_upload_bytes: get("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string()));
        }
        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }

        Ok(config)
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.database_path, PathBuf::from("./shrinkshield.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "9090"),
            ("DATABASE_PATH", "/tmp/receipts.db"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.database_path, PathBuf::from("/tmp/receipts.db"));
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        assert!(ApiConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", "0")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("DATABASE_PATH", "")])).is_err());
    }
}
