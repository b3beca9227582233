//! Caching infrastructure for the service layer.
//!
//! Cache-aside over the read paths (job listing, job detail, applicant
//! listing). Every entry carries a TTL, so an invalidation that fails only
//! leaves data stale until it expires.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
