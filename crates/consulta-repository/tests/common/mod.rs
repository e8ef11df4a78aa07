//! Common test infrastructure for database integration tests.

use consulta_config::DatabaseConfig;
use consulta_repository::{DatabasePool, DatabasePoolInterface};
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

/// Test database container wrapper.
///
/// Manages a PostgreSQL testcontainer lifecycle and provides a migrated pool.
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a new test database with a fresh PostgreSQL container.
    pub async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get PostgreSQL port");

        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port,
            name: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            max_connections: 5,
            acquire_timeout_ms: 5000,
            ..DatabaseConfig::default()
        };

        let pool = DatabasePool::new(&config);
        Self::wait_until_ready(&pool, 30).await;

        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self {
            _container: container,
            pool: Arc::new(pool),
        }
    }

    /// Returns the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Inserts a product and, when quantities are given, its inventory row.
    pub async fn insert_product(
        &self,
        nombre: &str,
        categoria: &str,
        stock: i32,
        inventory: Option<(i32, i32)>,
    ) -> i64 {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO productos (nombre, descripcion, precio, stock, categoria) \
             VALUES ($1, NULL, 9.99, $2, $3) RETURNING id",
        )
        .bind(nombre)
        .bind(stock)
        .bind(categoria)
        .fetch_one(self.pool.inner())
        .await
        .expect("Failed to insert product");

        if let Some((disponible, reservada)) = inventory {
            sqlx::query(
                "INSERT INTO inventario (producto_id, cantidad_disponible, cantidad_reservada) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(disponible)
            .bind(reservada)
            .execute(self.pool.inner())
            .await
            .expect("Failed to insert inventory");
        }

        id
    }

    async fn wait_until_ready(pool: &DatabasePool, max_attempts: u32) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match pool.health_check().await {
                Ok(()) => return,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Database not ready after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
