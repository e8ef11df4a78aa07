//! Diagnostics controller.

use crate::state::AppState;
use consulta_service::DiagnosticsSnapshot;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Cache section of the stats response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedisStats {
    pub connected: bool,
    /// Keys under the catalog namespace.
    pub total_keys: u64,
}

/// Database pool section of the stats response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostgresStats {
    pub pool_size: u32,
    pub idle_connections: u32,
}

/// Stats response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub redis: RedisStats,
    pub postgres: PostgresStats,
}

impl From<DiagnosticsSnapshot> for StatsResponse {
    fn from(snapshot: DiagnosticsSnapshot) -> Self {
        Self {
            success: true,
            redis: RedisStats {
                connected: snapshot.cache_connected,
                total_keys: snapshot.cache_key_count,
            },
            postgres: PostgresStats {
                pool_size: snapshot.pool_total,
                idle_connections: snapshot.pool_idle,
            },
        }
    }
}

/// Creates the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

/// Cache and pool occupancy.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "diagnostics",
    responses(
        (status = 200, description = "Current cache and pool state", body = StatsResponse)
    )
)]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.diagnostics.snapshot().await.into())
}
