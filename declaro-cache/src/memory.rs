//! In-memory cache store with per-entry expiry.

use crate::error::CacheResult;
use crate::traits::CacheStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// Process-local cache.
///
/// Expired entries are never returned; they are purged on the next write.
/// There is no size bound. Clones share the same entries.
///
/// Expiry follows `tokio::time`, so paused test clocks apply.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    data: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.data
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired entries.
    pub async fn purge_expired(&self) -> usize {
        let mut data = self.data.write().await;
        Self::purge(&mut data)
    }

    fn purge(data: &mut HashMap<String, CacheEntry>) -> usize {
        let now = Instant::now();
        let before = data.len();
        data.retain(|_, entry| entry.is_live(now));
        before - data.len()
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get_json(&self, key: &str) -> CacheResult<Option<String>> {
        let data = self.data.read().await;
        let now = Instant::now();
        Ok(data
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set_json(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        let mut data = self.data.write().await;

        let purged = Self::purge(&mut data);
        if purged > 0 {
            tracing::trace!(purged, "Purged expired cache entries");
        }
        data.insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        self.get_json(key).await.map(|v| v.is_some())
    }

    async fn clear(&self) -> CacheResult<()> {
        self.data.write().await.clear();
        Ok(())
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<Duration>> {
        let data = self.data.read().await;
        let now = Instant::now();
        Ok(data
            .get(key)
            .and_then(|entry| entry.expires_at)
            .filter(|expires_at| *expires_at > now)
            .map(|expires_at| expires_at - now))
    }
}
