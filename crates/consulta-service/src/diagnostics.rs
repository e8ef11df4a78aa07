//! Operational diagnostics.

use crate::cache::{cache_keys::NAMESPACE_PREFIX, CacheStore};
use consulta_core::{ConsultaError, ConsultaResult, Interface};
use consulta_repository::DatabasePoolInterface;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::warn;

/// Point-in-time view of both stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticsSnapshot {
    /// Whether the cache answered a liveness probe.
    pub cache_connected: bool,
    /// Keys currently held under the catalog namespace.
    pub cache_key_count: u64,
    /// Open database connections.
    pub pool_total: u32,
    /// Idle database connections.
    pub pool_idle: u32,
}

/// Reports connectivity and occupancy of the cache and the database pool.
#[async_trait]
pub trait DiagnosticsReporter: Interface + Send + Sync {
    /// Collects a snapshot. Never fails: an unreachable cache is reported as
    /// disconnected with zero keys.
    async fn snapshot(&self) -> DiagnosticsSnapshot;

    /// Returns whether the cache answers a liveness probe.
    async fn cache_connected(&self) -> bool;

    /// Succeeds when both the database and the cache respond.
    async fn readiness(&self) -> ConsultaResult<()>;
}

/// Diagnostics over the injected cache and database pool.
#[derive(Component)]
#[shaku(interface = DiagnosticsReporter)]
pub struct SystemDiagnostics {
    #[shaku(inject)]
    cache: Arc<dyn CacheStore>,
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SystemDiagnostics {
    /// Creates a new reporter.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheStore>, pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { cache, pool }
    }
}

#[async_trait]
impl DiagnosticsReporter for SystemDiagnostics {
    async fn snapshot(&self) -> DiagnosticsSnapshot {
        let stats = self.pool.stats();
        let mut snapshot = DiagnosticsSnapshot {
            cache_connected: self.cache.is_connected().await,
            cache_key_count: 0,
            pool_total: stats.total,
            pool_idle: stats.idle,
        };

        if snapshot.cache_connected {
            match self.cache.list_keys_by_prefix(NAMESPACE_PREFIX).await {
                Ok(keys) => snapshot.cache_key_count = u64::try_from(keys.len()).unwrap_or(u64::MAX),
                Err(e) => {
                    warn!(error = %e, "Failed to count cache keys");
                    snapshot.cache_connected = false;
                }
            }
        }

        snapshot
    }

    async fn cache_connected(&self) -> bool {
        self.cache.is_connected().await
    }

    async fn readiness(&self) -> ConsultaResult<()> {
        self.pool.health_check().await?;
        if !self.cache.is_connected().await {
            return Err(ConsultaError::cache("Cache did not answer PING"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SystemDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemDiagnostics").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheStore;
    use consulta_config::DatabaseConfig;
    use consulta_repository::DatabasePool;
    use std::time::Duration;

    fn offline_pool() -> Arc<dyn DatabasePoolInterface> {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout_ms: 200,
            ..DatabaseConfig::default()
        };
        Arc::new(DatabasePool::new(&config))
    }

    /// Answers PING but fails every key listing.
    struct ScanFailingCache;

    #[async_trait]
    impl CacheStore for ScanFailingCache {
        async fn get(&self, _key: &str) -> ConsultaResult<Option<String>> {
            Ok(None)
        }

        async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> ConsultaResult<()> {
            Ok(())
        }

        async fn delete_all(&self, _keys: &[String]) -> ConsultaResult<u64> {
            Ok(0)
        }

        async fn list_keys_by_prefix(&self, _prefix: &str) -> ConsultaResult<Vec<String>> {
            Err(ConsultaError::cache("SCAN aborted"))
        }

        async fn is_connected(&self) -> bool {
            true
        }

        async fn close(&self) {}
    }

    #[tokio::test]
    async fn test_snapshot_counts_namespace_keys() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let ttl = Duration::from_secs(60);
        cache.set_with_ttl("productos:populares", "[]", ttl).await.unwrap();
        cache.set_with_ttl("productos:categoria:hogar", "[]", ttl).await.unwrap();
        cache.set_with_ttl("otro:1", "[]", ttl).await.unwrap();

        let diagnostics = SystemDiagnostics::new(cache, offline_pool());
        let snapshot = diagnostics.snapshot().await;

        assert!(snapshot.cache_connected);
        assert_eq!(snapshot.cache_key_count, 2);
        assert_eq!(snapshot.pool_total, 0);
        assert_eq!(snapshot.pool_idle, 0);
    }

    #[tokio::test]
    async fn test_scan_failure_reports_disconnected() {
        let diagnostics = SystemDiagnostics::new(Arc::new(ScanFailingCache), offline_pool());
        let snapshot = diagnostics.snapshot().await;

        assert!(!snapshot.cache_connected);
        assert_eq!(snapshot.cache_key_count, 0);
    }

    #[tokio::test]
    async fn test_readiness_requires_database() {
        let diagnostics = SystemDiagnostics::new(Arc::new(InMemoryCacheStore::new()), offline_pool());

        let err = diagnostics.readiness().await.unwrap_err();
        assert!(matches!(err, ConsultaError::DatabaseUnavailable(_)));
    }
}
