//! Caching infrastructure for the service layer.
//!
//! [`CacheStore`] is the uniform adapter over a key-value store with
//! per-key expiry. [`RedisCacheStore`] backs production deployments and
//! [`InMemoryCacheStore`] serves local development and tests.

mod cache_store;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_keys::CacheKey;
pub use cache_store::{CacheLookup, CacheStore, CacheStoreExt};
pub use memory_cache::{InMemoryCacheStore, InMemoryCacheStoreParameters};
pub use redis_cache::{
    RedisCacheStore, RedisCacheStoreParameters, DEFAULT_COMMAND_TIMEOUT, DEFAULT_PING_TIMEOUT,
    DEFAULT_SCAN_COUNT,
};
