//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use jobboard_core::JobBoardResult;
use shaku::Interface;
use std::time::Duration;
use tracing::warn;

/// Cache interface for storing and retrieving cached data.
///
/// The cache is a disposable read accelerator. Values are JSON strings so
/// the trait stays dyn-compatible; typed access goes through [`CacheExt`].
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> JobBoardResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> JobBoardResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> JobBoardResult<bool>;

    /// Delete every key matching a glob pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> JobBoardResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;

    /// Checks that the backend answers.
    async fn ping(&self) -> JobBoardResult<()> {
        Ok(())
    }
}

/// Extension trait with typed and best-effort helpers.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> JobBoardResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> JobBoardResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Typed lookup where any failure counts as a miss.
    async fn get_or_miss<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                None
            }
        }
    }

    /// Typed store that only logs failures.
    async fn set_quietly<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        if let Err(e) = self.set(key, value, ttl).await {
            warn!("Cache write failed for '{}': {}", key, e);
        }
    }

    /// Deletes a key, logging failures.
    async fn evict(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            warn!("Cache invalidation failed for '{}': {}", key, e);
        }
    }

    /// Deletes a key pattern, logging failures.
    async fn evict_pattern(&self, pattern: &str) {
        if let Err(e) = self.delete_pattern(pattern).await {
            warn!("Cache invalidation failed for pattern '{}': {}", pattern, e);
        }
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
