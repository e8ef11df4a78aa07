//! OpenAPI documentation configuration.

use crate::controllers::{
    CacheClearedResponse, CategoryProductsResponse, HealthResponse, PostgresStats,
    ProductListResponse, RedisStats, StatsResponse,
};
use consulta_core::{DataSource, ErrorResponse, Product};
use utoipa::OpenApi;

/// OpenAPI documentation for the Consulta Rápida API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Consulta Rápida API",
        version = "1.0.0",
        description = "Read-through cached product catalog queries",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::product_controller::popular_products,
        crate::controllers::product_controller::products_by_category,
        crate::controllers::cache_controller::clear_cache,
        crate::controllers::stats_controller::stats,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            Product,
            DataSource,
            ErrorResponse,
            ProductListResponse,
            CategoryProductsResponse,
            CacheClearedResponse,
            StatsResponse,
            RedisStats,
            PostgresStats,
            HealthResponse,
        )
    ),
    tags(
        (name = "productos", description = "Cached catalog queries"),
        (name = "cache", description = "Cache administration"),
        (name = "diagnostics", description = "Cache and pool state"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
