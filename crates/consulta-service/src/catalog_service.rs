//! Catalog service trait definition.

use crate::dto::CatalogQueryResult;
use consulta_config::CacheConfig;
use consulta_core::{ConsultaResult, Interface};
use async_trait::async_trait;
use std::time::Duration;

/// Read-through access to the product catalog.
#[async_trait]
pub trait CatalogService: Interface + Send + Sync {
    /// Resolves the popular-products list.
    async fn popular_products(&self) -> ConsultaResult<CatalogQueryResult>;

    /// Resolves the in-stock products of a category, matched case-insensitively.
    async fn products_by_category(&self, category: &str) -> ConsultaResult<CatalogQueryResult>;
}

/// Cache-aside policy applied by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    /// Expiry of populated entries.
    pub ttl: Duration,
    /// Row limit of the popular-products query.
    pub popular_limit: u32,
    /// Row limit of the category query.
    pub category_limit: u32,
    /// Whether empty lists are written back.
    pub cache_empty_results: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            popular_limit: config.popular_limit,
            category_limit: config.category_limit,
            cache_empty_results: config.cache_empty_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = CachePolicy::default();
        assert_eq!(policy.ttl, Duration::from_secs(300));
        assert_eq!(policy.popular_limit, 20);
        assert_eq!(policy.category_limit, 50);
        assert!(!policy.cache_empty_results);
    }
}
