//! Cache store trait definition.

use crate::error::CacheResult;
use async_trait::async_trait;
use std::time::Duration;

/// Storage for cached response payloads.
///
/// Values are JSON text. Implementations own their synchronisation; callers
/// share a store as `Arc<dyn CacheStore>`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a JSON value from the cache.
    ///
    /// Returns `Ok(None)` when the key is missing or its entry has expired.
    async fn get_json(&self, key: &str) -> CacheResult<Option<String>>;

    /// Set a JSON value in the cache.
    ///
    /// An entry without `ttl` never expires.
    async fn set_json(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Check if a live entry exists for `key`.
    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// Clear all keys from the cache.
    async fn clear(&self) -> CacheResult<()>;

    /// Remaining time-to-live of a key.
    ///
    /// Returns `Ok(None)` if the key has no expiration or doesn't exist.
    async fn ttl(&self, key: &str) -> CacheResult<Option<Duration>>;
}
