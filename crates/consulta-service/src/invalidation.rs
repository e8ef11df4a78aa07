//! Namespace invalidation.

use crate::cache::{cache_keys::NAMESPACE_PREFIX, CacheStore};
use crate::metrics::CacheMetrics;
use consulta_core::{ConsultaError, ConsultaResult, Interface};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Bulk removal of cached entries.
#[async_trait]
pub trait InvalidationManager: Interface + Send + Sync {
    /// Deletes every key starting with `prefix` and returns how many were removed.
    ///
    /// Either all listed keys are deleted in one operation or an error is
    /// returned; no partial count is reported.
    async fn clear_namespace(&self, prefix: &str) -> ConsultaResult<u64>;

    /// Deletes every catalog entry.
    async fn clear_products(&self) -> ConsultaResult<u64> {
        self.clear_namespace(NAMESPACE_PREFIX).await
    }
}

/// Invalidation over a [`CacheStore`].
#[derive(Component)]
#[shaku(interface = InvalidationManager)]
pub struct CacheInvalidator {
    #[shaku(inject)]
    cache: Arc<dyn CacheStore>,
}

impl CacheInvalidator {
    /// Creates a new invalidator.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl InvalidationManager for CacheInvalidator {
    async fn clear_namespace(&self, prefix: &str) -> ConsultaResult<u64> {
        if prefix.is_empty() {
            return Err(ConsultaError::internal("Refusing to clear an empty key prefix"));
        }

        let keys = self.cache.list_keys_by_prefix(prefix).await?;
        if keys.is_empty() {
            debug!(prefix, "No keys to invalidate");
            return Ok(0);
        }

        let deleted = self.cache.delete_all(&keys).await?;
        CacheMetrics::invalidated(deleted);
        info!(prefix, deleted, "Cache namespace invalidated");
        Ok(deleted)
    }
}

impl std::fmt::Debug for CacheInvalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheInvalidator").finish_non_exhaustive()
    }
}
