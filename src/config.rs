//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEV_JWT_SECRET: &str = "book-catalog-development-secret-change-me";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Postgres connection string; the seeded in-memory store is used when unset
    pub database_url: Option<String>,
    /// HMAC secret for signing bearer tokens
    pub jwt_secret: String,
    /// Expected `iss` claim
    pub jwt_issuer: String,
    /// Expected `aud` claim
    pub jwt_audience: String,
    /// Token lifetime in seconds
    pub token_ttl: u64,
    /// Cache sliding expiration in seconds
    pub cache_sliding_ttl: u64,
    /// Cache absolute expiration in seconds
    pub cache_absolute_ttl: u64,
    /// Background cache cleanup interval in seconds
    pub cleanup_interval: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - Postgres URL (default: unset, in-memory store)
    /// - `JWT_SECRET` - Token signing secret (default: development secret)
    /// - `JWT_ISSUER` - Token issuer (default: BookStoreApi)
    /// - `JWT_AUDIENCE` - Token audience (default: BookStoreClient)
    /// - `TOKEN_TTL` - Token lifetime in seconds (default: 3600)
    /// - `CACHE_SLIDING_TTL` - Cache idle timeout in seconds (default: 300)
    /// - `CACHE_ABSOLUTE_TTL` - Cache max lifetime in seconds (default: 1200)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            jwt_secret: env_or("JWT_SECRET", defaults.jwt_secret),
            jwt_issuer: env_or("JWT_ISSUER", defaults.jwt_issuer),
            jwt_audience: env_or("JWT_AUDIENCE", defaults.jwt_audience),
            token_ttl: env_or("TOKEN_TTL", defaults.token_ttl),
            cache_sliding_ttl: env_or("CACHE_SLIDING_TTL", defaults.cache_sliding_ttl),
            cache_absolute_ttl: env_or("CACHE_ABSOLUTE_TTL", defaults.cache_absolute_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_issuer: "BookStoreApi".to_string(),
            jwt_audience: "BookStoreClient".to_string(),
            token_ttl: 3600,
            cache_sliding_ttl: 300,
            cache_absolute_ttl: 1200,
            cleanup_interval: 60,
        }
    }
}
