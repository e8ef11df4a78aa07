//! Cache administration controller.

use crate::{responses::ApiResult, state::AppState};
use consulta_core::ErrorResponse;
use axum::{extract::State, routing::delete, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Cache invalidation response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearedResponse {
    pub success: bool,
    pub message: String,
    pub keys_deleted: u64,
}

/// Creates the cache router.
pub fn router() -> Router<AppState> {
    Router::new().route("/cache", delete(clear_cache))
}

/// Removes every cached catalog entry.
#[utoipa::path(
    delete,
    path = "/cache",
    tag = "cache",
    responses(
        (status = 200, description = "Catalog entries removed", body = CacheClearedResponse),
        (status = 500, description = "Cache failure", body = ErrorResponse)
    )
)]
pub async fn clear_cache(State(state): State<AppState>) -> ApiResult<CacheClearedResponse> {
    let keys_deleted = state.invalidation.clear_products().await?;

    Ok(Json(CacheClearedResponse {
        success: true,
        message: "Caché limpiada".to_string(),
        keys_deleted,
    }))
}
