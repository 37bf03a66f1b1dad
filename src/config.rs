//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_FILENAME, DEFAULT_LIFETIME};

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the backing JSON file
    pub filename: String,
    /// Directory holding the backing file; `None` uses the temp-dir default
    pub directory: Option<PathBuf>,
    /// Lifetime in seconds recorded for entries stored without an explicit one
    pub default_lifetime: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_FILENAME` - Backing file name (default: filesystem-cache.json)
    /// - `CACHE_DIRECTORY` - Backing file directory (default: system temp dir)
    /// - `DEFAULT_LIFETIME` - Default lifetime in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            filename: env::var("CACHE_FILENAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            directory: env::var("CACHE_DIRECTORY")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            default_lifetime: env::var("DEFAULT_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LIFETIME),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            directory: None,
            default_lifetime: DEFAULT_LIFETIME,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.filename, "filesystem-cache.json");
        assert!(config.directory.is_none());
        assert_eq!(config.default_lifetime, 3600);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_FILENAME");
        env::remove_var("CACHE_DIRECTORY");
        env::remove_var("DEFAULT_LIFETIME");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.filename, "filesystem-cache.json");
        assert!(config.directory.is_none());
        assert_eq!(config.default_lifetime, 3600);
        assert_eq!(config.server_port, 3000);
    }
}
