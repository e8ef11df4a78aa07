//! Product catalog controller.

use crate::{
    responses::{format_latency, ApiResult},
    state::AppState,
};
use consulta_core::{DataSource, ErrorResponse, Product};
use consulta_service::CatalogQueryResult;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

/// Popular products response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    pub data: Vec<Product>,
    pub source: DataSource,
    /// Resolution time, e.g. `"4ms"`.
    pub latency: String,
    pub cached: bool,
}

impl From<CatalogQueryResult> for ProductListResponse {
    fn from(result: CatalogQueryResult) -> Self {
        Self {
            success: true,
            cached: result.is_cached(),
            latency: format_latency(result.latency),
            source: result.source,
            data: result.products,
        }
    }
}

/// Category listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryProductsResponse {
    pub success: bool,
    /// Category as supplied in the path.
    pub categoria: String,
    pub data: Vec<Product>,
    pub source: DataSource,
    /// Resolution time, e.g. `"4ms"`.
    pub latency: String,
    pub total: usize,
}

impl CategoryProductsResponse {
    fn new(categoria: String, result: CatalogQueryResult) -> Self {
        Self {
            success: true,
            categoria,
            total: result.total(),
            latency: format_latency(result.latency),
            source: result.source,
            data: result.products,
        }
    }
}

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/populares", get(popular_products))
        .route("/categoria/:categoria", get(products_by_category))
}

/// Popular in-stock products, served through the cache.
#[utoipa::path(
    get,
    path = "/productos/populares",
    tag = "productos",
    responses(
        (status = 200, description = "Products ordered by stock", body = ProductListResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn popular_products(State(state): State<AppState>) -> ApiResult<ProductListResponse> {
    debug!("Popular products request");

    let result = state.catalog_service.popular_products().await?;
    Ok(Json(result.into()))
}

/// In-stock products of a category, matched case-insensitively.
#[utoipa::path(
    get,
    path = "/productos/categoria/{categoria}",
    tag = "productos",
    params(
        ("categoria" = String, Path, description = "Category name, any case")
    ),
    responses(
        (status = 200, description = "Products of the category", body = CategoryProductsResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> ApiResult<CategoryProductsResponse> {
    debug!("Category products request: {}", categoria);

    let result = state.catalog_service.products_by_category(&categoria).await?;
    Ok(Json(CategoryProductsResponse::new(categoria, result)))
}
