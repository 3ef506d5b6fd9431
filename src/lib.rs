//! LRU TTL - A thread-safe in-process cache
//!
//! Combines least-recently-used eviction with optional per-entry
//! time-to-live expiration. Expiry is lazy (checked on access) plus an
//! explicit sweep via [`LruCache::cleanup_expired`].

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use cache::{CacheStats, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
