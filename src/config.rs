//! Configuration Module
//!
//! Handles loading cache sizing and expiry settings from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// TTL in seconds applied by callers that cache with a default expiry, 0 = none
    pub default_ttl: u64,
    /// Background cleanup task interval in seconds, 0 = no task
    pub cleanup_interval: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 600)
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_env("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            default_ttl: parse_env("CACHE_DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: parse_env("CACHE_CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Rejects settings that cannot produce a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn default_ttl_duration(&self) -> Option<Duration> {
        (self.default_ttl > 0).then(|| Duration::from_secs(self.default_ttl))
    }

    pub fn cleanup_interval_duration(&self) -> Option<Duration> {
        (self.cleanup_interval > 0).then(|| Duration::from_secs(self.cleanup_interval))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_ttl: 600,
            cleanup_interval: 1,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
