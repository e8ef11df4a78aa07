//! Catalog query DTOs.

use consulta_core::{DataSource, Product};
use std::time::Duration;

/// A resolved product list together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQueryResult {
    /// Products in query order.
    pub products: Vec<Product>,
    /// Store that produced the list.
    pub source: DataSource,
    /// Wall time spent resolving.
    pub latency: Duration,
}

impl CatalogQueryResult {
    /// Creates a new result.
    #[must_use]
    pub fn new(products: Vec<Product>, source: DataSource, latency: Duration) -> Self {
        Self {
            products,
            source,
            latency,
        }
    }

    /// Number of products returned.
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len()
    }

    /// Resolution latency in whole milliseconds.
    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }

    /// Returns true when served from cache.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.source.is_cache()
    }
}
