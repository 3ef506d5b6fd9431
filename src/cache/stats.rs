//! Cache Statistics Module
//!
//! Tracks lookup hits and misses and produces point-in-time snapshots.

use serde::Serialize;

// == Hit Counter ==
/// Monotonic hit/miss counters, guarded by the cache lock.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HitCounter {
    pub hits: u64,
    pub misses: u64,
}

impl HitCounter {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of `get` calls that returned a live value
    pub hits: u64,
    /// Number of `get` calls that found nothing (absent or expired)
    pub misses: u64,
    /// hits / (hits + misses), 0.0 when no lookups happened
    pub hit_rate: f64,
    /// Resident entries, including expired ones not yet reaped
    pub size: usize,
    /// Fixed maximum number of entries
    pub capacity: usize,
}

impl CacheStats {
    pub(crate) fn snapshot(counter: HitCounter, size: usize, capacity: usize) -> Self {
        Self {
            hits: counter.hits,
            misses: counter.misses,
            hit_rate: hit_rate(counter.hits, counter.misses),
            size,
            capacity,
        }
    }
}

// == Hit Rate ==
/// Returns hits / (hits + misses), or 0.0 if no requests have been made.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
