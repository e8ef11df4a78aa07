//! Database connection pool management.

use consulta_config::DatabaseConfig;
use consulta_core::{ConsultaError, ConsultaResult, Interface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

/// Point-in-time pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Connections currently open, idle or in use.
    pub total: u32,
    /// Open connections not checked out.
    pub idle: u32,
}

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying PostgreSQL pool.
    fn inner(&self) -> &PgPool;

    /// Returns the pool's current connection counts.
    fn stats(&self) -> PoolStats;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> ConsultaResult<()>;

    /// Runs the bundled bootstrap migrations.
    async fn run_migrations(&self) -> ConsultaResult<()>;

    /// Closes the pool, waiting for checked-out connections to return.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Creates a pool from configuration.
    ///
    /// Connections are opened on first use, so the service starts even when
    /// the database is down; requests then fail individually.
    pub fn new(config: &DatabaseConfig) -> Self {
        info!(
            host = %config.host,
            database = %config.name,
            max_connections = config.max_connections,
            "Creating PostgreSQL connection pool"
        );

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Creates a pool and probes connectivity once, logging the outcome.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let pool = Self::new(config);
        match pool.health_check().await {
            Ok(()) => info!("Connected to PostgreSQL"),
            Err(e) => warn!("PostgreSQL not reachable at startup: {}", e),
        }
        pool
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &PgPool {
        &self.pool
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            total: self.pool.size(),
            idle: u32::try_from(self.pool.num_idle()).unwrap_or(u32::MAX),
        }
    }

    async fn health_check(&self) -> ConsultaResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ConsultaError::DatabaseUnavailable(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> ConsultaResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ConsultaError::QueryFailed(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
