mod common;

use axum::http::{Method, StatusCode};
use common::{router_with_diagnostics, send, StubDiagnostics, TestApp, UnreachableCache};
use consulta_rest::MetricsRoute;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;

#[tokio::test]
async fn test_health_reports_cache_connectivity() {
    let app = TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "consulta-rapida");
    assert_eq!(body["redisConnected"], true);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_health_stays_ok_during_cache_outage() {
    let app = TestApp::with_cache(Arc::new(UnreachableCache));

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redisConnected"], false);
}

#[tokio::test]
async fn test_stats_counts_namespace_keys() {
    let app = TestApp::new();
    app.get("/productos/populares").await;
    app.get("/productos/categoria/electronics").await;

    let (status, body) = app.get("/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["redis"]["connected"], true);
    assert_eq!(body["redis"]["totalKeys"], 2);
    assert_eq!(body["postgres"]["poolSize"], 0);
    assert_eq!(body["postgres"]["idleConnections"], 0);
}

#[tokio::test]
async fn test_stats_during_cache_outage() {
    let app = TestApp::with_cache(Arc::new(UnreachableCache));

    let (status, body) = app.get("/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redis"]["connected"], false);
    assert_eq!(body["redis"]["totalKeys"], 0);
}

#[tokio::test]
async fn test_readiness_follows_dependencies() {
    let ready = router_with_diagnostics(Arc::new(StubDiagnostics { ready: true }), None);
    let (status, _) = send(&ready, Method::GET, "/ready").await;
    assert_eq!(status, StatusCode::OK);

    let not_ready = router_with_diagnostics(Arc::new(StubDiagnostics { ready: false }), None);
    let (status, _) = send(&not_ready, Method::GET, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&not_ready, Method::GET, "/live").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_fails_without_database() {
    let app = TestApp::new();

    let (status, _) = app.get("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/productos/populares"].is_object());
}

#[tokio::test]
async fn test_metrics_route_mounted_when_configured() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let metrics = MetricsRoute {
        path: "/metrics".to_string(),
        handle: recorder.handle(),
    };
    let router = router_with_diagnostics(Arc::new(StubDiagnostics { ready: true }), Some(metrics));

    let (status, _) = send(&router, Method::GET, "/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let without = router_with_diagnostics(Arc::new(StubDiagnostics { ready: true }), None);
    let (status, _) = send(&without, Method::GET, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
