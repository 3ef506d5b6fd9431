//! Cache Module
//!
//! Provides in-process caching with LRU eviction and optional TTL expiration.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{Iter, NodeId, RecencyList};
pub use stats::{hit_rate, CacheStats};
pub use store::LruCache;
