//! Cache store interface.

use consulta_core::{ConsultaError, ConsultaResult, Interface};
use async_trait::async_trait;
use std::time::Duration;

/// Uniform adapter over a key-value store with per-key expiry.
///
/// Transport failures surface as [`ConsultaError::CacheUnavailable`]; the
/// caller decides whether to degrade or fail.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> ConsultaResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> ConsultaResult<()>;

    /// Deletes all `keys` in a single operation and returns how many existed.
    async fn delete_all(&self, keys: &[String]) -> ConsultaResult<u64>;

    /// Lists every live key starting with `prefix`, sorted and deduplicated.
    async fn list_keys_by_prefix(&self, prefix: &str) -> ConsultaResult<Vec<String>>;

    /// Returns whether the store answers a liveness probe.
    async fn is_connected(&self) -> bool;

    /// Releases the store's connections.
    async fn close(&self);
}

/// Outcome of a cache read.
#[derive(Debug)]
pub enum CacheLookup {
    /// A value was found.
    Hit(String),
    /// The key is absent or expired.
    Miss,
    /// The store could not be reached.
    Unavailable(ConsultaError),
}

/// Extension trait classifying reads into [`CacheLookup`] outcomes.
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Reads `key` without propagating transport errors.
    async fn lookup(&self, key: &str) -> CacheLookup {
        match self.get(key).await {
            Ok(Some(value)) => CacheLookup::Hit(value),
            Ok(None) => CacheLookup::Miss,
            Err(e) => CacheLookup::Unavailable(e),
        }
    }
}

impl<T: CacheStore + ?Sized> CacheStoreExt for T {}
