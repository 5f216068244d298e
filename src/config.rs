//! Configuration Module
//!
//! Handles loading server configuration from environment variables.
//! Values are read once at startup and never change afterwards.

use std::env;
use std::time::Duration;

/// Default upstream user listing endpoint
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Expected `api-key` header value; `None` disables the API-key gate
    pub api_key: Option<String>,
    /// Base URL of the upstream user service
    pub users_url: String,
    /// Lifetime of the cached user list in milliseconds
    pub users_cache_ttl_ms: u64,
    /// Upper bound on a single upstream fetch in milliseconds
    pub fetch_timeout_ms: u64,
    /// Username accepted by the credentials gate
    pub auth_username: String,
    /// Password accepted by the credentials gate
    pub auth_password: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `API_KEY` - Required `api-key` header value (default: unset, gate disabled)
    /// - `USERS_URL` - Upstream base URL (default: jsonplaceholder users)
    /// - `USERS_CACHE_TTL` - Cache TTL in milliseconds (default: 60000)
    /// - `FETCH_TIMEOUT_MS` - Upstream timeout in milliseconds (default: 5000)
    /// - `AUTH_USERNAME` / `AUTH_PASSWORD` - Credentials (default: admin / 12345)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    ///
    /// Missing or unparseable numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            server_port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.server_port),
            api_key: lookup("API_KEY").filter(|v| !v.is_empty()),
            users_url: lookup("USERS_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.users_url),
            users_cache_ttl_ms: number("USERS_CACHE_TTL").unwrap_or(defaults.users_cache_ttl_ms),
            fetch_timeout_ms: number("FETCH_TIMEOUT_MS").unwrap_or(defaults.fetch_timeout_ms),
            auth_username: lookup("AUTH_USERNAME").unwrap_or(defaults.auth_username),
            auth_password: lookup("AUTH_PASSWORD").unwrap_or(defaults.auth_password),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.users_cache_ttl_ms)
    }

    /// Upstream fetch timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            api_key: None,
            users_url: DEFAULT_USERS_URL.to_string(),
            users_cache_ttl_ms: 60_000,
            fetch_timeout_ms: 5_000,
            auth_username: "admin".to_string(),
            auth_password: "12345".to_string(),
        }
    }
}
