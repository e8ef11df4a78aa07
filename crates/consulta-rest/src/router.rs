//! Main application router.

use crate::{
    controllers::{cache_controller, health_controller, product_controller, stats_controller},
    middleware::{logging_middleware, redact_error_details, timeout_envelope},
    openapi::ApiDoc,
    state::AppState,
};
use consulta_config::ServerConfig;
use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Prometheus scrape endpoint mounted on the router.
#[derive(Clone)]
pub struct MetricsRoute {
    /// Mount path, e.g. `/metrics`.
    pub path: String,
    /// Handle rendering the installed recorder.
    pub handle: PrometheusHandle,
}

impl std::fmt::Debug for MetricsRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRoute").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    metrics: Option<MetricsRoute>,
) -> Router {
    let cors = create_cors_layer(server_config);

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/productos", product_controller::router())
        .merge(stats_controller::router())
        .merge(cache_controller::router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(MetricsRoute { path, handle }) = metrics {
        info!("Prometheus metrics exposed at {}", path);
        router = router.route(&path, get(move || async move { handle.render() }));
    }

    if !server_config.expose_error_details {
        router = router.layer(middleware::from_fn(redact_error_details));
    }

    let router = router
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(middleware::from_fn(timeout_envelope))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with catalog endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}
