//! Dependency injection module using Shaku.
//!
//! - `CatalogModule`: Redis-backed cache
//! - `LocalCatalogModule`: in-process cache, for running without Redis

use consulta_config::AppConfig;
use consulta_core::ConsultaResult;
use consulta_repository::{DatabasePool, DatabasePoolInterface, DatabasePoolParameters, PgProductRepository};
use consulta_rest::AppState;
use consulta_service::{
    CacheInvalidator, CachePolicy, CacheStore, CatalogService, CatalogServiceComponent,
    CatalogServiceComponentParameters, DiagnosticsReporter, InMemoryCacheStore,
    InvalidationManager, RedisCacheStore, RedisCacheStoreParameters, SystemDiagnostics,
    DEFAULT_PING_TIMEOUT, DEFAULT_SCAN_COUNT,
};
use shaku::{module, HasComponent, Module};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

module! {
    pub CatalogModule {
        components = [
            DatabasePool,
            PgProductRepository,
            RedisCacheStore,
            CatalogServiceComponent,
            CacheInvalidator,
            SystemDiagnostics,
        ],
        providers = [],
    }
}

module! {
    pub LocalCatalogModule {
        components = [
            DatabasePool,
            PgProductRepository,
            InMemoryCacheStore,
            CatalogServiceComponent,
            CacheInvalidator,
            SystemDiagnostics,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Builds the Redis-backed module.
pub fn build_catalog_module(config: &AppConfig, db_pool: &DatabasePool) -> ConsultaResult<CatalogModule> {
    let redis_pool = RedisCacheStore::create_pool(&config.redis)?;

    Ok(CatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheStore>(RedisCacheStoreParameters {
            pool: redis_pool,
            scan_count: DEFAULT_SCAN_COUNT,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            command_timeout: config.redis.command_timeout(),
        })
        .with_component_parameters::<CatalogServiceComponent>(CatalogServiceComponentParameters {
            policy: CachePolicy::from(&config.cache),
        })
        .build())
}

/// Builds the module with an in-process cache.
pub fn build_local_catalog_module(config: &AppConfig, db_pool: &DatabasePool) -> LocalCatalogModule {
    LocalCatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<CatalogServiceComponent>(CatalogServiceComponentParameters {
            policy: CachePolicy::from(&config.cache),
        })
        .build()
}

/// Services resolved from a module, plus the stores closed on shutdown.
#[derive(Clone)]
pub struct AppComponents {
    pub state: AppState,
    pub cache: Arc<dyn CacheStore>,
    pub database: Arc<dyn DatabasePoolInterface>,
}

impl AppComponents {
    /// Resolves every component the server needs from `module`.
    pub fn resolve<M>(module: &M, service_name: &str) -> Self
    where
        M: Module
            + HasComponent<dyn CatalogService>
            + HasComponent<dyn InvalidationManager>
            + HasComponent<dyn DiagnosticsReporter>
            + HasComponent<dyn CacheStore>
            + HasComponent<dyn DatabasePoolInterface>,
    {
        Self {
            state: AppState::from_module(module, service_name),
            cache: module.resolve(),
            database: module.resolve(),
        }
    }

    /// Wires the components selected by `config.redis.enabled`.
    pub fn from_config(config: &AppConfig, db_pool: &DatabasePool) -> ConsultaResult<Self> {
        if config.redis.enabled {
            info!("Using Redis cache at {}", config.redis.url());
            let module = build_catalog_module(config, db_pool)?;
            Ok(Self::resolve(&module, &config.app.name))
        } else {
            info!("Redis disabled; using in-process cache");
            let module = build_local_catalog_module(config, db_pool);
            Ok(Self::resolve(&module, &config.app.name))
        }
    }
}

impl std::fmt::Debug for AppComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppComponents").finish_non_exhaustive()
    }
}
