//! User Service Module
//!
//! Read-through lookup layer showing how a collaborator consumes the cache:
//! try the cache first, fall back to the user directory on a miss, and
//! cache what was found with the configured TTL.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStats, LruCache};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::models::User;

/// Where a lookup was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Directory,
}

// == User Service ==
/// Cache-first user lookups over an in-memory directory.
#[derive(Debug)]
pub struct UserService {
    cache: LruCache<String, User>,
    directory: HashMap<String, User>,
    ttl: Option<Duration>,
}

impl UserService {
    /// Creates a service over `users`, sized and timed from `config`.
    pub fn new(config: &CacheConfig, users: impl IntoIterator<Item = User>) -> Result<Self> {
        Ok(Self {
            cache: LruCache::from_config(config)?,
            directory: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            ttl: config.default_ttl_duration(),
        })
    }

    // == Get User ==
    /// Looks a user up, caching directory hits.
    ///
    /// Returns None when the user is in neither the cache nor the directory.
    pub fn get_user(&self, id: &str) -> Option<(User, Source)> {
        if let Some(user) = self.cache.get(id) {
            return Some((user, Source::Cache));
        }

        let user = self.directory.get(id)?.clone();
        debug!(user_id = id, "user loaded from directory");

        match self.ttl {
            Some(ttl) => self.cache.put_with_ttl(id.to_string(), user.clone(), ttl),
            None => self.cache.put(id.to_string(), user.clone()),
        }
        Some((user, Source::Directory))
    }

    /// Drops a cached user so the next lookup reloads it.
    pub fn invalidate(&self, id: &str) -> bool {
        self.cache.delete(id)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &LruCache<String, User> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(capacity: usize) -> UserService {
        let config = CacheConfig {
            capacity,
            default_ttl: 600,
            cleanup_interval: 0,
        };
        let users = vec![
            User::new("user1", "john_doe", "john@example.com"),
            User::new("user2", "jane_smith", "jane@example.com"),
            User::new("user3", "bob_wilson", "bob@example.com"),
        ];
        UserService::new(&config, users).unwrap()
    }

    #[test]
    fn test_first_lookup_hits_directory_then_cache() {
        let service = service(10);

        let (user, source) = service.get_user("user1").unwrap();
        assert_eq!(user.username, "john_doe");
        assert_eq!(source, Source::Directory);

        let (_, source) = service.get_user("user1").unwrap();
        assert_eq!(source, Source::Cache);

        let stats = service.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!(service.cache().ttl_remaining("user1").is_some());
    }

    #[test]
    fn test_unknown_user() {
        let service = service(10);
        assert!(service.get_user("nobody").is_none());
        assert_eq!(service.cache().len(), 0);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let service = service(10);
        service.get_user("user2");

        assert!(service.invalidate("user2"));
        let (_, source) = service.get_user("user2").unwrap();
        assert_eq!(source, Source::Directory);
    }

    #[test]
    fn test_small_cache_evicts() {
        let service = service(2);
        service.get_user("user1");
        service.get_user("user2");
        service.get_user("user3");

        assert_eq!(service.cache().len(), 2);
        assert!(!service.cache().contains("user1"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CacheConfig {
            capacity: 0,
            ..CacheConfig::default()
        };
        assert!(UserService::new(&config, Vec::new()).is_err());
    }
}
