//! Process-local cache used when Redis is disabled.

use super::CacheInterface;
use async_trait::async_trait;
use jobboard_core::JobBoardResult;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on live entries.
const MAX_ENTRIES: u64 = 10_000;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires every entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory TTL cache backed by `moka`.
pub struct InMemoryCacheService {
    entries: Cache<String, Entry>,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }

    /// Number of live entries, after flushing pending evictions.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Whether the cache holds no live entry.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> JobBoardResult<Option<String>> {
        match self.entries.get(key).await {
            Some(entry) => {
                debug!("Cache hit for key '{}'", key);
                Ok(Some(entry.value))
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Ok(None)
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> JobBoardResult<()> {
        self.entries
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> JobBoardResult<bool> {
        Ok(self.entries.remove(key).await.is_some())
    }

    async fn delete_pattern(&self, pattern: &str) -> JobBoardResult<u64> {
        let matching: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, _)| glob_match(pattern, key))
            .map(|(key, _)| String::clone(&key))
            .collect();

        let mut deleted = 0u64;
        for key in matching {
            if self.entries.remove(&key).await.is_some() {
                deleted += 1;
            }
        }

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

/// Redis-style glob match supporting `*` and `?`.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((star_pi, star_ti)) = star {
            pi = star_pi + 1;
            ti = star_ti + 1;
            star = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
