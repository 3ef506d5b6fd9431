//! LRU TTL demo
//!
//! Walks through eviction, TTL expiry, statistics, sweeping and the
//! read-through service pattern, logging what the cache does.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl::models::User;
use lru_ttl::service::UserService;
use lru_ttl::{spawn_cleanup_task, CacheConfig, LruCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    config.validate().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: capacity={}, default_ttl={}s, cleanup_interval={}s",
        config.capacity, config.default_ttl, config.cleanup_interval
    );

    eviction_demo();
    ttl_demo().await;
    stats_demo()?;
    sweep_demo(&config).await?;
    service_demo(&config)?;

    info!("Demo complete");
    Ok(())
}

fn eviction_demo() {
    let cache = LruCache::new(3);
    cache.put("key1", "value1");
    cache.put("key2", "value2");
    cache.put("key3", "value3");

    // key1 becomes most recent, so key2 is evicted next
    cache.get("key1");
    cache.put("key4", "value4");

    let keys: Vec<_> = cache.keys().collect();
    info!(?keys, size = cache.len(), "LRU eviction: remaining keys, most recent first");
}

async fn ttl_demo() {
    let cache = LruCache::new(50);
    cache.put_with_ttl("todo1", "Buy groceries", Duration::from_millis(400));
    cache.put("todo2", "Walk the dog");
    cache.put_with_ttl("todo3", "Read book", Duration::from_millis(200));

    tokio::time::sleep(Duration::from_millis(300)).await;

    for id in ["todo1", "todo2", "todo3"] {
        match cache.get(id) {
            Some(title) => info!(id, title, "still cached"),
            None => info!(id, "expired"),
        }
    }
}

fn stats_demo() -> anyhow::Result<()> {
    let cache = LruCache::new(10);
    for i in 0..20 {
        cache.put(i, format!("value-{i}"));
    }
    for i in 0..30 {
        cache.get(&(i % 15));
    }

    let stats = cache.stats();
    info!("Cache statistics: {}", serde_json::to_string(&stats)?);
    Ok(())
}

async fn sweep_demo(config: &CacheConfig) -> anyhow::Result<()> {
    let cache = Arc::new(LruCache::from_config(config)?);
    cache.put_with_ttl("expire-fast", "value1", Duration::from_millis(100));
    cache.put_with_ttl("expire-slow", "value2", Duration::from_secs(5));
    cache.put("no-expire", "value3");

    let handle = config
        .cleanup_interval_duration()
        .map(|interval| spawn_cleanup_task(cache.clone(), interval));

    tokio::time::sleep(Duration::from_millis(200)).await;
    let removed = cache.cleanup_expired();
    info!(removed, size = cache.len(), "manual sweep");

    if let Some(handle) = handle {
        handle.abort();
    }
    Ok(())
}

fn service_demo(config: &CacheConfig) -> anyhow::Result<()> {
    let users = vec![
        User::new("user1", "john_doe", "john@example.com"),
        User::new("user2", "jane_smith", "jane@example.com"),
        User::new("user3", "bob_wilson", "bob@example.com"),
    ];
    let service = UserService::new(config, users)?;

    for id in ["user1", "user2", "user1", "user3", "user1", "user4"] {
        match service.get_user(id) {
            Some((user, source)) => info!(id, username = %user.username, ?source, "got user"),
            None => info!(id, "user not found"),
        }
    }

    let stats = service.cache_stats();
    info!(
        "User cache: hit rate {:.1}%, size {}",
        stats.hit_rate * 100.0,
        stats.size
    );
    Ok(())
}
