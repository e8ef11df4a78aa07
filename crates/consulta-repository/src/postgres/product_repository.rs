//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use consulta_core::{ConsultaResult, Product};
use async_trait::async_trait;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// Columns shared by both catalog queries. Casts pin the decoded Rust types
/// regardless of the exact column types of the deployed schema.
const PRODUCT_COLUMNS: &str = r#"
    p.id::BIGINT AS id,
    p.nombre,
    p.descripcion,
    p.precio::FLOAT8 AS precio,
    p.stock::INTEGER AS stock,
    p.categoria,
    i.cantidad_disponible::INTEGER AS cantidad_disponible,
    i.cantidad_reservada::INTEGER AS cantidad_reservada
"#;

/// PostgreSQL product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct PgProductRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product joined with its inventory.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    nombre: String,
    descripcion: Option<String>,
    precio: f64,
    stock: i32,
    categoria: String,
    cantidad_disponible: Option<i32>,
    cantidad_reservada: Option<i32>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.nombre,
            description: row.descripcion,
            price: row.precio,
            stock: row.stock,
            category: row.categoria,
            available_quantity: row.cantidad_disponible,
            reserved_quantity: row.cantidad_reservada,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_popular(&self, limit: u32) -> ConsultaResult<Vec<Product>> {
        debug!("Finding popular products, limit: {}", limit);

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM productos p
            LEFT JOIN inventario i ON p.id = i.producto_id
            WHERE p.stock > 0
            ORDER BY p.stock DESC, p.id
            LIMIT $1
            "#
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(i64::from(limit))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_category(&self, category: &str, limit: u32) -> ConsultaResult<Vec<Product>> {
        debug!("Finding products by category: {}, limit: {}", category, limit);

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM productos p
            LEFT JOIN inventario i ON p.id = i.producto_id
            WHERE LOWER(p.categoria) = LOWER($1) AND p.stock > 0
            ORDER BY p.stock DESC, p.id
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(category)
            .bind(i64::from(limit))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

impl std::fmt::Debug for PgProductRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductRepository").finish_non_exhaustive()
    }
}
