//! Shared harness for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use consulta_config::{DatabaseConfig, ServerConfig};
use consulta_core::{ConsultaError, ConsultaResult, Product};
use consulta_repository::{DatabasePool, DatabasePoolInterface, ProductRepository};
use consulta_rest::{create_router, AppState, MetricsRoute};
use consulta_service::{
    CacheInvalidator, CachePolicy, CacheStore, CatalogServiceComponent, DiagnosticsReporter,
    DiagnosticsSnapshot, InMemoryCacheStore, SystemDiagnostics,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Repository fake over a fixed product list.
pub struct MockProductRepository {
    products: Mutex<Vec<Product>>,
    calls: AtomicUsize,
    fail: bool,
    delay: Duration,
}

impl MockProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            calls: AtomicUsize::new(0),
            fail: false,
            delay: Duration::ZERO,
        }
    }

    /// Answers after `delay`, measured on the tokio clock.
    pub fn slow(products: Vec<Product>, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(products)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn query(&self, category: Option<&str>, limit: u32) -> ConsultaResult<Vec<Product>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ConsultaError::DatabaseUnavailable(
                "pool timed out while waiting for an open connection".to_string(),
            ));
        }

        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.stock > 0)
            .filter(|p| category.map_or(true, |c| p.category.to_lowercase() == c.to_lowercase()))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.stock.cmp(&a.stock).then(a.id.cmp(&b.id)));
        products.truncate(limit as usize);
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn find_popular(&self, limit: u32) -> ConsultaResult<Vec<Product>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.query(None, limit)
    }

    async fn find_by_category(&self, category: &str, limit: u32) -> ConsultaResult<Vec<Product>> {
        self.query(Some(category), limit)
    }
}

/// Cache fake that refuses every operation.
pub struct UnreachableCache;

#[async_trait]
impl CacheStore for UnreachableCache {
    async fn get(&self, _key: &str) -> ConsultaResult<Option<String>> {
        Err(ConsultaError::cache("connection refused"))
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl: Duration) -> ConsultaResult<()> {
        Err(ConsultaError::cache("connection refused"))
    }

    async fn delete_all(&self, _keys: &[String]) -> ConsultaResult<u64> {
        Err(ConsultaError::cache("connection refused"))
    }

    async fn list_keys_by_prefix(&self, _prefix: &str) -> ConsultaResult<Vec<String>> {
        Err(ConsultaError::cache("connection refused"))
    }

    async fn is_connected(&self) -> bool {
        false
    }

    async fn close(&self) {}
}

/// Diagnostics fake with a fixed readiness answer.
pub struct StubDiagnostics {
    pub ready: bool,
}

#[async_trait]
impl DiagnosticsReporter for StubDiagnostics {
    async fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot::default()
    }

    async fn cache_connected(&self) -> bool {
        self.ready
    }

    async fn readiness(&self) -> ConsultaResult<()> {
        if self.ready {
            Ok(())
        } else {
            Err(ConsultaError::DatabaseUnavailable("down".to_string()))
        }
    }
}

pub fn product(id: i64, name: &str, category: &str, stock: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: Some(format!("{} de prueba", name)),
        price: 19.99,
        stock,
        category: category.to_string(),
        available_quantity: Some(stock),
        reserved_quantity: Some(0),
    }
}

pub fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Laptop", "Electronics", 15),
        product(2, "Mouse", "Electronics", 40),
        product(3, "Silla", "Hogar", 8),
        product(4, "Mesa", "Hogar", 0),
    ]
}

/// Router wired to real service components over fakes.
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<dyn CacheStore>,
    pub repository: Arc<MockProductRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(
            Arc::new(InMemoryCacheStore::new()),
            MockProductRepository::new(sample_catalog()),
            ServerConfig::default(),
        )
    }

    pub fn with_cache(cache: Arc<dyn CacheStore>) -> Self {
        Self::build(cache, MockProductRepository::new(sample_catalog()), ServerConfig::default())
    }

    pub fn with_repository(repository: MockProductRepository, server_config: ServerConfig) -> Self {
        Self::build(Arc::new(InMemoryCacheStore::new()), repository, server_config)
    }

    pub fn build(
        cache: Arc<dyn CacheStore>,
        repository: MockProductRepository,
        server_config: ServerConfig,
    ) -> Self {
        let repository = Arc::new(repository);
        let state = AppState::new(
            Arc::new(CatalogServiceComponent::new(
                cache.clone(),
                repository.clone(),
                CachePolicy::default(),
            )),
            Arc::new(CacheInvalidator::new(cache.clone())),
            Arc::new(SystemDiagnostics::new(cache.clone(), offline_pool())),
            "consulta-rapida",
        );

        Self {
            router: create_router(state, &server_config, None),
            cache,
            repository,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::DELETE, uri).await
    }
}

/// Lazy pool pointed at a closed port; never connects unless queried.
pub fn offline_pool() -> Arc<dyn DatabasePoolInterface> {
    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        acquire_timeout_ms: 200,
        ..DatabaseConfig::default()
    };
    Arc::new(DatabasePool::new(&config))
}

pub fn router_with_diagnostics(diagnostics: Arc<dyn DiagnosticsReporter>, metrics: Option<MetricsRoute>) -> Router {
    let cache: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
    let state = AppState::new(
        Arc::new(CatalogServiceComponent::new(
            cache.clone(),
            Arc::new(MockProductRepository::new(vec![])),
            CachePolicy::default(),
        )),
        Arc::new(CacheInvalidator::new(cache)),
        diagnostics,
        "consulta-rapida",
    );
    create_router(state, &ServerConfig::default(), metrics)
}

pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, body)
}
