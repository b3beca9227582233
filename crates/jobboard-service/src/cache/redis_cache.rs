//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use jobboard_config::RedisConfig;
use jobboard_core::{JobBoardError, JobBoardResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 200;

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (every read is a miss).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Builds a connection pool from configuration.
    pub fn create_pool(config: &RedisConfig) -> JobBoardResult<Pool> {
        info!("Creating Redis connection pool");
        let mut cfg = Config::from_url(config.url.clone());
        cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size));
        cfg.create_pool(Some(Runtime::Tokio1))
            .map_err(|e| JobBoardError::Configuration(format!("Invalid Redis configuration: {}", e)))
    }

    /// Component parameters for registering the cache in a shaku module.
    #[must_use]
    pub fn into_parameters(self) -> RedisCacheServiceParameters {
        RedisCacheServiceParameters { pool: self.pool }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> JobBoardResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| JobBoardError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(JobBoardError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> JobBoardResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| JobBoardError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> JobBoardResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| JobBoardError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> JobBoardResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| JobBoardError::Cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> JobBoardResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        // SCAN keeps the server responsive on large keyspaces, unlike KEYS.
        loop {
            let (next, keys): (u64, Vec<String>) = deadpool_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| JobBoardError::Cache(format!("Failed to scan keys: {}", e)))?;

            if !keys.is_empty() {
                let removed: i64 = conn
                    .del(&keys)
                    .await
                    .map_err(|e| JobBoardError::Cache(format!("Failed to delete keys: {}", e)))?;
                deleted += u64::try_from(removed).unwrap_or(0);
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }

    async fn ping(&self) -> JobBoardResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| JobBoardError::Cache(format!("Ping failed: {}", e)))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
