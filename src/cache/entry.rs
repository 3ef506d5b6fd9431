//! Cache Entry Module
//!
//! Defines the value container stored in every recency node, with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached payload together with its own key and optional expiry.
///
/// The key is carried inside the entry so that removing a node from the
/// recency list can clear the key index directly.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now`.
    ///
    /// A `ttl` of `None` or zero produces an entry that never expires.
    pub fn new(key: K, value: V, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: expiry_from_ttl(now, ttl),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired only when `now` is strictly
    /// after its expiration instant. Every expiry path in the cache goes
    /// through this predicate.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    /// Checks whether the entry has expired against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL as of `now`, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}

// == Utility Functions ==
/// Computes the absolute expiry for a TTL starting at `now`.
///
/// Zero (or absent) TTLs mean "no expiration", not "expire immediately".
/// A TTL too large to represent as an `Instant` also never expires.
pub fn expiry_from_ttl(now: Instant, ttl: Option<Duration>) -> Option<Instant> {
    ttl.filter(|ttl| !ttl.is_zero())
        .and_then(|ttl| now.checked_add(ttl))
}
