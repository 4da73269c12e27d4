//! Tagged response cache
//!
//! Caches JSON responses for roadmap and progress reads. Each entry carries a
//! set of tags (`roadmap:{course}`, `progress:{course}`, `module:{id}`);
//! invalidating a tag drops every entry that carries it. Cache failures are
//! logged and treated as misses, never surfaced to callers.
//!
//! The in-memory backend prunes expired entries, and their tag memberships,
//! on every write; Redis expires both through TTLs.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use crate::config::{CacheBackendKind, CacheConfig};
use crate::utils::errors::{ApiResult, CodeLegendsError, Result};
use crate::utils::logging::log_cache_invalidation;

/// Tag helpers shared by writers and invalidators
pub mod tags {
    pub fn roadmap(course_slug: &str) -> String {
        format!("roadmap:{}", course_slug)
    }

    pub fn progress(course_slug: &str) -> String {
        format!("progress:{}", course_slug)
    }

    pub fn module(module_id: &str) -> String {
        format!("module:{}", module_id)
    }
}

#[derive(Debug)]
struct MemoryEntry {
    payload: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct MemoryCache {
    entries: HashMap<String, MemoryEntry>,
    tags: HashMap<String, HashSet<String>>,
}

impl MemoryCache {
    /// Remove one entry and its key from every tag set
    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.tags.retain(|_, keys| {
            keys.remove(key);
            !keys.is_empty()
        });
        removed
    }

    /// Drop expired entries and any tag membership they left behind
    fn prune_expired(&mut self, now: Instant) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        if self.entries.len() == before {
            return;
        }

        let entries = &self.entries;
        self.tags.retain(|_, keys| {
            keys.retain(|key| entries.contains_key(key));
            !keys.is_empty()
        });
    }
}

#[derive(Clone)]
enum CacheBackend {
    Memory(Arc<Mutex<MemoryCache>>),
    Redis(redis::aio::ConnectionManager),
}

/// Response cache with tag-based invalidation
#[derive(Clone)]
pub struct ResponseCache {
    backend: CacheBackend,
    prefix: String,
    ttl: Duration,
}

impl ResponseCache {
    /// In-process cache
    pub fn in_memory(prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            backend: CacheBackend::Memory(Arc::new(Mutex::new(MemoryCache::default()))),
            prefix: prefix.into(),
            ttl,
        }
    }

    /// Redis-backed cache
    pub async fn redis(url: &str, prefix: impl Into<String>, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            backend: CacheBackend::Redis(connection_manager),
            prefix: prefix.into(),
            ttl,
        })
    }

    /// Build the backend selected in configuration
    pub async fn from_config(config: &CacheConfig) -> Result<Self> {
        let ttl = Duration::from_secs(config.ttl_seconds);
        match config.backend {
            CacheBackendKind::Memory => Ok(Self::in_memory(config.prefix.clone(), ttl)),
            CacheBackendKind::Redis => {
                let url = config.redis_url.as_deref().ok_or_else(|| {
                    CodeLegendsError::Config("Redis URL is required when the cache backend is redis".to_string())
                })?;
                Self::redis(url, config.prefix.clone(), ttl).await
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            CacheBackend::Memory(_) => "memory",
            CacheBackend::Redis(_) => "redis",
        }
    }

    /// Read a cached value; misses, expired entries and backend errors all yield `None`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = match &self.backend {
            CacheBackend::Memory(cache) => {
                let mut cache = lock(cache);
                let now = Instant::now();
                match cache.entries.get(key).map(|e| (e.expires_at > now, e.payload.clone())) {
                    Some((true, payload)) => Some(payload),
                    Some((false, _)) => {
                        cache.remove_entry(key);
                        None
                    }
                    None => None,
                }
            }
            CacheBackend::Redis(manager) => {
                let mut conn = manager.clone();
                match conn.get::<_, Option<String>>(self.entry_key(key)).await {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(key = key, error = %e, "Failed to read cache entry");
                        None
                    }
                }
            }
        }?;

        match serde_json::from_str(&payload) {
            Ok(value) => {
                debug!(key = key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key = key, error = %e, "Failed to deserialize cache entry, dropping it");
                self.remove(key).await;
                None
            }
        }
    }

    /// Store a value under `key`, tagged with `tags`
    pub async fn put<T: Serialize>(&self, key: &str, value: &T, tags: &[String]) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        match &self.backend {
            CacheBackend::Memory(cache) => {
                let mut cache = lock(cache);
                let now = Instant::now();
                cache.prune_expired(now);
                cache.entries.insert(
                    key.to_string(),
                    MemoryEntry {
                        payload,
                        expires_at: now + self.ttl,
                    },
                );
                for tag in tags {
                    cache.tags.entry(tag.clone()).or_default().insert(key.to_string());
                }
            }
            CacheBackend::Redis(manager) => {
                if let Err(e) = self.redis_put(manager.clone(), key, payload, tags).await {
                    warn!(key = key, error = %e, "Failed to write cache entry");
                    return;
                }
            }
        }

        debug!(key = key, tags = ?tags, "Cached response");
    }

    /// Drop every entry carrying `tag`; returns how many entries were removed
    pub async fn invalidate_tag(&self, tag: &str) -> u64 {
        let removed = match &self.backend {
            CacheBackend::Memory(cache) => {
                let mut cache = lock(cache);
                let keys = cache.tags.remove(tag).unwrap_or_default();
                keys.iter()
                    .filter(|key| cache.remove_entry(key.as_str()))
                    .count() as u64
            }
            CacheBackend::Redis(manager) => match self.redis_invalidate(manager.clone(), tag).await {
                Ok(removed) => removed,
                Err(e) => {
                    warn!(tag = tag, error = %e, "Failed to invalidate cache tag");
                    0
                }
            },
        };

        log_cache_invalidation(tag, removed);
        removed
    }

    /// Return the cached value for `key` or fetch, cache and return it.
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, tags: &[String], fetch: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if let Some(cached) = self.get(key).await {
            return Ok(cached);
        }

        let value = fetch().await?;
        self.put(key, &value, tags).await;
        Ok(value)
    }

    async fn remove(&self, key: &str) {
        match &self.backend {
            CacheBackend::Memory(cache) => {
                lock(cache).remove_entry(key);
            }
            CacheBackend::Redis(manager) => {
                let mut conn = manager.clone();
                if let Err(e) = conn.del::<_, ()>(self.entry_key(key)).await {
                    warn!(key = key, error = %e, "Failed to delete cache entry");
                }
            }
        }
    }

    async fn redis_put(
        &self,
        mut conn: redis::aio::ConnectionManager,
        key: &str,
        payload: String,
        tags: &[String],
    ) -> redis::RedisResult<()> {
        let ttl = self.ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(self.entry_key(key), payload, ttl).await?;

        for tag in tags {
            let tag_key = self.tag_key(tag);
            conn.sadd::<_, _, ()>(&tag_key, self.entry_key(key)).await?;
            conn.expire::<_, ()>(&tag_key, ttl as i64).await?;
        }

        Ok(())
    }

    async fn redis_invalidate(&self, mut conn: redis::aio::ConnectionManager, tag: &str) -> redis::RedisResult<u64> {
        let tag_key = self.tag_key(tag);
        let keys: Vec<String> = conn.smembers(&tag_key).await?;

        let removed = if keys.is_empty() {
            0
        } else {
            conn.del::<_, u64>(&keys).await?
        };
        conn.del::<_, ()>(&tag_key).await?;

        Ok(removed)
    }

    fn entry_key(&self, key: &str) -> String {
        format!("{}cache:{}", self.prefix, key)
    }

    fn tag_key(&self, tag: &str) -> String {
        format!("{}tag:{}", self.prefix, tag)
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("backend", &self.backend_name())
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

fn lock(cache: &Mutex<MemoryCache>) -> MutexGuard<'_, MemoryCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ApiError;

    fn cache() -> ResponseCache {
        ResponseCache::in_memory("test:", Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = cache();
        cache.put("progress:js:user_1", &vec!["l1", "l2"], &[tags::progress("js")]).await;

        let cached: Option<Vec<String>> = cache.get("progress:js:user_1").await;
        assert_eq!(cached, Some(vec!["l1".to_string(), "l2".to_string()]));
    }

    #[tokio::test]
    async fn test_invalidate_tag_removes_only_tagged_entries() {
        let cache = cache();
        cache.put("roadmap:js:u1", &1, &[tags::roadmap("js"), tags::module("m1")]).await;
        cache.put("roadmap:js:u2", &2, &[tags::roadmap("js"), tags::module("m1")]).await;
        cache.put("progress:js:u1", &3, &[tags::progress("js")]).await;

        assert_eq!(cache.invalidate_tag(&tags::module("m1")).await, 2);
        assert!(cache.get::<i32>("roadmap:js:u1").await.is_none());
        assert!(cache.get::<i32>("roadmap:js:u2").await.is_none());
        assert_eq!(cache.get::<i32>("progress:js:u1").await, Some(3));

        assert_eq!(cache.invalidate_tag(&tags::module("m1")).await, 0);
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = ResponseCache::in_memory("test:", Duration::from_millis(0));
        cache.put("k", &1, &[]).await;
        assert!(cache.get::<i32>("k").await.is_none());
    }

    fn memory_sizes(cache: &ResponseCache) -> (usize, usize) {
        match &cache.backend {
            CacheBackend::Memory(memory) => {
                let memory = lock(memory);
                (memory.entries.len(), memory.tags.len())
            }
            CacheBackend::Redis(_) => unreachable!("memory backend expected"),
        }
    }

    #[tokio::test]
    async fn test_expired_entries_and_tags_are_pruned() {
        let cache = ResponseCache::in_memory("test:", Duration::from_millis(0));
        cache.put("roadmap:js:u1", &1, &[tags::roadmap("js"), tags::module("m1")]).await;
        cache.put("progress:py:u2", &2, &[tags::progress("py")]).await;

        // only the entry written last survives the prune, with its one tag
        assert_eq!(memory_sizes(&cache), (1, 1));

        assert!(cache.get::<i32>("progress:py:u2").await.is_none());
        assert_eq!(memory_sizes(&cache), (0, 0));
    }

    #[tokio::test]
    async fn test_invalidation_leaves_no_dangling_tag_members() {
        let cache = cache();
        cache.put("roadmap:js:u1", &1, &[tags::roadmap("js"), tags::module("m1")]).await;

        assert_eq!(cache.invalidate_tag(&tags::roadmap("js")).await, 1);
        assert_eq!(memory_sizes(&cache), (0, 0));
        assert_eq!(cache.invalidate_tag(&tags::module("m1")).await, 0);
    }

    #[tokio::test]
    async fn test_get_or_fetch_only_fetches_on_miss() {
        let cache = cache();
        let mut calls = 0;

        let first: ApiResult<u32> = cache
            .get_or_fetch("k", &[], || {
                calls += 1;
                async { Ok(7) }
            })
            .await;
        assert_eq!(first, Ok(7));

        let second: ApiResult<u32> = cache
            .get_or_fetch("k", &[], || {
                calls += 1;
                async { Ok(8) }
            })
            .await;
        assert_eq!(second, Ok(7));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_failures() {
        let cache = cache();

        let failed: ApiResult<u32> = cache
            .get_or_fetch("k", &[], || async { Err(ApiError::Network("down".to_string())) })
            .await;
        assert!(failed.is_err());
        assert!(cache.get::<u32>("k").await.is_none());
    }
}
