//! Repository trait definitions.

use consulta_core::{ConsultaResult, Interface, Product};
use async_trait::async_trait;

/// Read-only product catalog queries.
///
/// Both queries only return products with stock, ordered by stock
/// descending.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Returns up to `limit` in-stock products.
    async fn find_popular(&self, limit: u32) -> ConsultaResult<Vec<Product>>;

    /// Returns up to `limit` in-stock products whose category matches
    /// `category` case-insensitively.
    async fn find_by_category(&self, category: &str, limit: u32) -> ConsultaResult<Vec<Product>>;
}
