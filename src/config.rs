//! Configuration Module
//!
//! Handles loading and validating cache and server configuration from
//! environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default capacity bound
pub const DEFAULT_MAX_SIZE: usize = 5;
/// Default entry lifetime in seconds
pub const DEFAULT_TTL_SECS: u64 = 10;
/// Default snapshot location, relative to the working directory
pub const DEFAULT_PERSISTENCE_FILE: &str = "cache.json";
/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Lifetime given to every new or refreshed entry
    pub ttl: Duration,
    /// Location of the durable snapshot
    pub persistence_file: PathBuf,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE` - Maximum cache entries (default: 5)
    /// - `TTL_SECONDS` - Entry lifetime in seconds, fractions allowed (default: 10)
    /// - `PERSISTENCE_FILE` - Snapshot path (default: cache.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Unparseable or non-positive values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env::var("MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.max_size),
            ttl: env::var("TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|secs| *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .unwrap_or(defaults.ttl),
            persistence_file: env::var("PERSISTENCE_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.persistence_file),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Rejects values the cache cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be a positive integer".to_string(),
            ));
        }
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "ttl must be a positive number of seconds".to_string(),
            ));
        }
        if self.persistence_file.as_os_str().is_empty() {
            return Err(CacheError::InvalidConfig(
                "persistence_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            persistence_file: PathBuf::from(DEFAULT_PERSISTENCE_FILE),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_size, 5);
        assert_eq!(config.ttl, Duration::from_secs(10));
        assert_eq!(config.persistence_file, PathBuf::from("cache.json"));
        assert_eq!(config.server_port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests.
        env::remove_var("MAX_SIZE");
        env::remove_var("TTL_SECONDS");
        env::remove_var("PERSISTENCE_FILE");
        env::remove_var("SERVER_PORT");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("MAX_SIZE", "12");
        env::set_var("TTL_SECONDS", "1.5");
        env::set_var("PERSISTENCE_FILE", "/tmp/other.json");
        let config = Config::from_env();
        assert_eq!(config.max_size, 12);
        assert_eq!(config.ttl, Duration::from_millis(1500));
        assert_eq!(config.persistence_file, PathBuf::from("/tmp/other.json"));

        env::set_var("MAX_SIZE", "0");
        env::set_var("TTL_SECONDS", "-3");
        let config = Config::from_env();
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(config.ttl, Duration::from_secs(DEFAULT_TTL_SECS));

        env::remove_var("MAX_SIZE");
        env::remove_var("TTL_SECONDS");
        env::remove_var("PERSISTENCE_FILE");
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let zero_size = Config {
            max_size: 0,
            ..Config::default()
        };
        assert!(matches!(zero_size.validate(), Err(CacheError::InvalidConfig(_))));

        let zero_ttl = Config {
            ttl: Duration::ZERO,
            ..Config::default()
        };
        assert!(matches!(zero_ttl.validate(), Err(CacheError::InvalidConfig(_))));
    }
}
