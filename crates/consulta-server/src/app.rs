//! Application lifecycle.

use crate::{di::AppComponents, shutdown::shutdown_signal, startup::print_startup_info};
use consulta_config::{AppConfig, ObservabilityConfig};
use consulta_core::{ConsultaError, ConsultaResult};
use consulta_repository::DatabasePool;
use consulta_rest::{create_router, MetricsRoute};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Interval between Prometheus histogram upkeep runs.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// A wired, not yet serving application.
pub struct App {
    config: AppConfig,
    components: AppComponents,
    metrics: Option<MetricsRoute>,
}

impl App {
    /// Creates the pools and wires every component.
    ///
    /// Neither store has to be reachable: the database pool connects lazily
    /// and cache failures degrade per request.
    pub async fn build(config: AppConfig, metrics: Option<MetricsRoute>) -> ConsultaResult<Self> {
        let db_pool = DatabasePool::connect(&config.database).await;
        let components = AppComponents::from_config(&config, &db_pool)?;

        if config.database.run_migrations {
            components.database.run_migrations().await?;
        }

        Ok(Self {
            config,
            components,
            metrics,
        })
    }

    /// Serves until a shutdown signal, then releases both stores.
    pub async fn run(self) -> ConsultaResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serves until `signal` resolves.
    ///
    /// In-flight requests get `server.shutdown_timeout_secs` to finish; after
    /// that they are abandoned. The cache pool is closed before the
    /// database pool is drained.
    pub async fn run_until<S>(self, signal: S) -> ConsultaResult<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let Self {
            config,
            components,
            metrics,
        } = self;

        let router = create_router(components.state.clone(), &config.server, metrics.clone());

        let addr = config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ConsultaError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&addr, metrics.as_ref().map(|m| m.path.as_str()));

        let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                signal.await;
                let _ = signalled_tx.send(());
            })
            .into_future();

        let drain_timeout = config.server.shutdown_timeout();
        let drain_deadline = async move {
            if signalled_rx.await.is_ok() {
                tokio::time::sleep(drain_timeout).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = server => {
                result.map_err(|e| ConsultaError::Internal(format!("REST server error: {}", e)))?;
            }
            () = drain_deadline => {
                warn!(
                    timeout_secs = drain_timeout.as_secs(),
                    "Shutdown timeout elapsed, abandoning in-flight requests"
                );
            }
        }

        components.cache.close().await;
        components.database.close().await;

        info!("Server shutdown complete");
        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("addr", &self.config.server.addr())
            .finish_non_exhaustive()
    }
}

/// Installs the global Prometheus recorder when metrics are enabled.
///
/// Must run inside a Tokio runtime; spawns the histogram upkeep task.
pub fn install_metrics(config: &ObservabilityConfig) -> ConsultaResult<Option<MetricsRoute>> {
    if !config.metrics_enabled {
        info!("Metrics disabled");
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ConsultaError::Configuration(format!("Failed to install metrics recorder: {}", e)))?;

    consulta_service::metrics::register_metrics();

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(Some(MetricsRoute {
        path: config.metrics_path.clone(),
        handle,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout_secs = 1;
        config.redis.enabled = false;
        config.database.host = "127.0.0.1".to_string();
        config.database.port = 1;
        config.database.acquire_timeout_ms = 100;
        config
    }

    #[tokio::test]
    async fn test_build_succeeds_with_database_down() {
        let app = App::build(offline_config(), None).await;
        assert!(app.is_ok());
    }

    #[tokio::test]
    async fn test_run_until_returns_after_signal() {
        let app = App::build(offline_config(), None).await.unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), app.run_until(async {})).await;

        assert!(matches!(result, Ok(Ok(()))));
    }

    #[test]
    fn test_metrics_disabled_mounts_nothing() {
        let config = ObservabilityConfig {
            metrics_enabled: false,
            ..ObservabilityConfig::default()
        };
        assert!(install_metrics(&config).unwrap().is_none());
    }
}
