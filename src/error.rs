//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Lookups never fail:
//! absence is reported through `Option`/`bool`, so errors only arise when
//! building a cache from untrusted sizing input.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be a positive number of entries
    #[error("Invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// Configuration value rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be greater than zero)"
        );
        assert_eq!(
            CacheError::InvalidConfig("bad".to_string()).to_string(),
            "Invalid configuration: bad"
        );
    }
}
