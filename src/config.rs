//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Largest number of person IDs the stats API accepts comfortably in one call.
pub const MAX_PEOPLE_BATCH_SIZE: usize = 40;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds applied to every cached upstream payload
    pub default_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Root URL of the stats API
    pub upstream_base_url: String,
    /// Per-request timeout for upstream calls, in seconds
    pub upstream_timeout: u64,
    /// Maximum person IDs per people call
    pub people_batch_size: usize,
    /// Directory holding the static browser client
    pub static_dir: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DEFAULT_TTL` - Cache TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `UPSTREAM_BASE_URL` - Stats API root (default: https://statsapi.mlb.com)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `PEOPLE_BATCH_SIZE` - IDs per people call, clamped to 1..=40 (default: 40)
    /// - `STATIC_DIR` - Static asset directory (default: client)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            people_batch_size: parse_var::<usize>("PEOPLE_BATCH_SIZE")
                .map(|n| n.clamp(1, MAX_PEOPLE_BATCH_SIZE))
                .unwrap_or(defaults.people_batch_size),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.static_dir),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            default_ttl: 300,
            cleanup_interval: 60,
            upstream_base_url: "https://statsapi.mlb.com".to_string(),
            upstream_timeout: 10,
            people_batch_size: MAX_PEOPLE_BATCH_SIZE,
            static_dir: "client".to_string(),
        }
    }
}
