//! Cache Store Module
//!
//! Main cache engine combining the key index with the recency list and TTL
//! expiration, all behind a single reader-writer lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use ahash::RandomState;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::entry::expiry_from_ttl;
use crate::cache::lru::{NodeId, RecencyList};
use crate::cache::stats::HitCounter;
use crate::cache::{CacheEntry, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Upper bound on eager allocation; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == Shared State ==
/// Key index and recency list, always mutated in lock-step.
#[derive(Debug)]
struct Inner<K, V> {
    index: HashMap<K, NodeId, RandomState>,
    order: RecencyList<K, V>,
    counter: HitCounter,
}

impl<K: Hash + Eq, V> Inner<K, V> {
    fn new(capacity: usize) -> Self {
        let prealloc = capacity.min(PREALLOC_LIMIT);
        Self {
            index: HashMap::with_capacity_and_hasher(prealloc, RandomState::new()),
            order: RecencyList::with_capacity(prealloc),
            counter: HitCounter::default(),
        }
    }

    /// Removes a node from both structures using the key stored in its entry.
    fn remove_node(&mut self, id: NodeId) -> Option<CacheEntry<K, V>> {
        let entry = self.order.remove(id)?;
        self.index.remove(&entry.key);
        Some(entry)
    }
}

// == LRU Cache ==
/// Thread-safe LRU cache with optional per-entry TTL.
///
/// Every operation takes the internal lock exactly once. `get` needs the
/// write lock because a hit reorders recency; `contains`, `peek`, `len`
/// and `stats` only ever take the read lock.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lru_ttl::LruCache;
///
/// let cache = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put_with_ttl("b", 2, Duration::from_secs(60));
/// cache.put("c", 3);
///
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("c"), Some(3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: RwLock<Inner<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            inner: RwLock::new(Inner::new(capacity)),
            capacity,
        }
    }

    /// Creates a new cache, rejecting a zero capacity with an error.
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self::new(capacity))
    }

    /// Creates a cache sized from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::try_new(config.capacity)
    }

    // == Get ==
    /// Retrieves a value and marks the key as most recently used.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let Some(&id) = inner.index.get(key) else {
            inner.counter.record_miss();
            return None;
        };

        let expired = inner.order.get(id).map_or(true, |e| e.is_expired_at(now));
        if expired {
            inner.remove_node(id);
            inner.counter.record_miss();
            return None;
        }

        inner.order.move_to_front(id);
        inner.counter.record_hit();
        inner.order.get(id).map(|e| e.value.clone())
    }

    // == Put ==
    /// Stores a value that never expires.
    pub fn put(&self, key: K, value: V) {
        self.insert(key, value, None);
    }

    /// Stores a value that expires after `ttl`.
    ///
    /// A zero `ttl` means no expiration.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.insert(key, value, Some(ttl));
    }

    fn insert(&self, key: K, value: V, ttl: Option<Duration>) {
        let expires_at = expiry_from_ttl(Instant::now(), ttl);
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        // Overwrite in place, size unchanged
        if let Some(&id) = inner.index.get(&key) {
            if let Some(entry) = inner.order.get_mut(id) {
                entry.value = value;
                entry.expires_at = expires_at;
            }
            inner.order.move_to_front(id);
            return;
        }

        let id = inner.order.push_front(CacheEntry {
            key: key.clone(),
            value,
            expires_at,
        });
        inner.index.insert(key, id);

        while inner.order.len() > self.capacity {
            let Some(evicted) = inner.order.pop_back() else {
                break;
            };
            inner.index.remove(&evicted.key);
            trace!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    // == Delete ==
    /// Removes an entry, returning whether one was present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let Some(&id) = inner.index.get(key) else {
            return false;
        };
        inner.remove_node(id).is_some()
    }

    // == Contains ==
    /// Reports whether a live entry exists, without touching recency or stats.
    ///
    /// An expired entry reports `false` but is left in place: removing it
    /// would need the write lock. A later `get`, `delete` or
    /// `cleanup_expired` reaps it.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read_live(key, |_| ()).is_some()
    }

    /// Returns a live value without touching recency or stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read_live(key, |entry| entry.value.clone())
    }

    /// Returns how long a live entry has left, or None if it never expires.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.read_live(key, |entry| entry.ttl_remaining_at(now))
            .flatten()
    }

    fn read_live<Q, T>(&self, key: &Q, f: impl FnOnce(&CacheEntry<K, V>) -> T) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let inner = self.inner.read();
        let id = *inner.index.get(key)?;
        inner
            .order
            .get(id)
            .filter(|entry| !entry.is_expired_at(now))
            .map(f)
    }

    // == Size ==
    /// Returns the number of resident entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Clear ==
    /// Removes every entry and resets hit/miss counters.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let removed = inner.order.len();
        inner.index.clear();
        inner.order.clear();
        inner.counter.reset();
        debug!(removed, "cache cleared");
    }

    // == Keys / Values ==
    /// Snapshot of live keys, most recently used first.
    pub fn keys(&self) -> std::vec::IntoIter<K> {
        self.snapshot(|entry| entry.key.clone())
    }

    /// Snapshot of live values, most recently used first.
    pub fn values(&self) -> std::vec::IntoIter<V> {
        self.snapshot(|entry| entry.value.clone())
    }

    fn snapshot<T>(&self, f: impl Fn(&CacheEntry<K, V>) -> T) -> std::vec::IntoIter<T> {
        let now = Instant::now();
        // Exclusive so the snapshot cannot interleave with a mutation
        let inner = self.inner.write();
        inner
            .order
            .iter()
            .filter(|entry| !entry.is_expired_at(now))
            .map(f)
            .collect::<Vec<_>>()
            .into_iter()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        CacheStats::snapshot(inner.counter, inner.order.len(), self.capacity)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, walking from the least recently used end.
    ///
    /// Returns the number of entries removed. Hit/miss counters are untouched.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let mut removed = 0;
        let mut cursor = inner.order.back();
        while let Some(id) = cursor {
            cursor = inner.order.prev(id);
            let expired = inner.order.get(id).is_some_and(|e| e.is_expired_at(now));
            if expired && inner.remove_node(id).is_some() {
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, remaining = inner.order.len(), "expired entries removed");
        }
        removed
    }

    /// Asserts that the key index and recency list agree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let inner = self.inner.read();
        assert_eq!(inner.index.len(), inner.order.len(), "index/list length mismatch");
        assert!(inner.order.len() <= self.capacity, "size exceeds capacity");
        for (key, &id) in inner.index.iter() {
            let entry = inner.order.get(id).expect("index points at a freed slot");
            assert!(entry.key == *key, "index key does not match node key");
        }
        assert_eq!(inner.order.iter().count(), inner.order.len());
    }
}
