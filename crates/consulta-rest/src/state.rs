//! Application state for Axum handlers.

use consulta_service::{CatalogService, DiagnosticsReporter, InvalidationManager};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
    pub invalidation: Arc<dyn InvalidationManager>,
    pub diagnostics: Arc<dyn DiagnosticsReporter>,
    /// Name reported by `/health`.
    pub service_name: Arc<str>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        catalog_service: Arc<dyn CatalogService>,
        invalidation: Arc<dyn InvalidationManager>,
        diagnostics: Arc<dyn DiagnosticsReporter>,
        service_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            catalog_service,
            invalidation,
            diagnostics,
            service_name: service_name.into(),
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M, service_name: impl Into<Arc<str>>) -> Self
    where
        M: Module
            + HasComponent<dyn CatalogService>
            + HasComponent<dyn InvalidationManager>
            + HasComponent<dyn DiagnosticsReporter>,
    {
        Self::new(
            module.resolve(),
            module.resolve(),
            module.resolve(),
            service_name,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}
