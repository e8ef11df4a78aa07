//! Cache-aside catalog service implementation.

use crate::cache::{CacheKey, CacheLookup, CacheStore, CacheStoreExt};
use crate::catalog_service::{CachePolicy, CatalogService};
use crate::dto::CatalogQueryResult;
use crate::metrics::{outcome, CacheMetrics};
use consulta_core::{ConsultaResult, DataSource, Product};
use consulta_repository::ProductRepository;
use async_trait::async_trait;
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Catalog service reading through the cache into the product repository.
///
/// Cache failures never fail a request: an unreachable or unreadable cache
/// degrades to a database read, and a failed write-back is only logged.
#[derive(Component)]
#[shaku(interface = CatalogService)]
pub struct CatalogServiceComponent {
    #[shaku(inject)]
    cache: Arc<dyn CacheStore>,
    #[shaku(inject)]
    repository: Arc<dyn ProductRepository>,
    policy: CachePolicy,
}

impl CatalogServiceComponent {
    /// Creates a new catalog service.
    #[must_use]
    pub fn new(
        cache: Arc<dyn CacheStore>,
        repository: Arc<dyn ProductRepository>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            cache,
            repository,
            policy,
        }
    }

    /// Returns the active cache policy.
    #[must_use]
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    async fn resolve<F, Fut>(&self, key: CacheKey, load: F) -> ConsultaResult<CatalogQueryResult>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = ConsultaResult<Vec<Product>>> + Send,
    {
        let start = Instant::now();

        match self.cache.lookup(key.as_str()).await {
            CacheLookup::Hit(raw) => match serde_json::from_str::<Vec<Product>>(&raw) {
                Ok(products) => {
                    CacheMetrics::lookup(outcome::HIT);
                    let result = CatalogQueryResult::new(products, DataSource::Cache, start.elapsed());
                    debug!(key = %key, latency_ms = result.latency_ms(), "Cache HIT");
                    CacheMetrics::resolved(result.source, result.latency);
                    return Ok(result);
                }
                Err(e) => {
                    CacheMetrics::lookup(outcome::CORRUPT);
                    warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                }
            },
            CacheLookup::Miss => {
                CacheMetrics::lookup(outcome::MISS);
                debug!(key = %key, "Cache MISS - querying database");
            }
            CacheLookup::Unavailable(e) => {
                CacheMetrics::lookup(outcome::UNAVAILABLE);
                warn!(key = %key, error = %e, "Cache unavailable - querying database");
            }
        }

        let products = load().await?;

        if !products.is_empty() || self.policy.cache_empty_results {
            self.populate(&key, &products).await?;
        }

        let result = CatalogQueryResult::new(products, DataSource::Database, start.elapsed());
        info!(
            key = %key,
            total = result.total(),
            latency_ms = result.latency_ms(),
            "Resolved from database"
        );
        CacheMetrics::resolved(result.source, result.latency);
        Ok(result)
    }

    /// Writes a freshly loaded list back to the cache. Only serialization
    /// errors propagate; store failures are logged and swallowed.
    async fn populate(&self, key: &CacheKey, products: &[Product]) -> ConsultaResult<()> {
        let payload = serde_json::to_string(products)?;

        match self.cache.set_with_ttl(key.as_str(), &payload, self.policy.ttl).await {
            Ok(()) => debug!(key = %key, ttl_secs = self.policy.ttl.as_secs(), "Cache populated"),
            Err(e) => {
                CacheMetrics::write_failed();
                warn!(key = %key, error = %e, "Failed to populate cache");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogService for CatalogServiceComponent {
    async fn popular_products(&self) -> ConsultaResult<CatalogQueryResult> {
        let limit = self.policy.popular_limit;
        self.resolve(CacheKey::popular(), || self.repository.find_popular(limit))
            .await
    }

    async fn products_by_category(&self, category: &str) -> ConsultaResult<CatalogQueryResult> {
        let limit = self.policy.category_limit;
        self.resolve(CacheKey::category(category), || {
            self.repository.find_by_category(category, limit)
        })
        .await
    }
}

impl std::fmt::Debug for CatalogServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServiceComponent")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
