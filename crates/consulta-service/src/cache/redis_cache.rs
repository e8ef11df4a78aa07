//! Redis-backed cache store.

use super::CacheStore;
use consulta_config::RedisConfig;
use consulta_core::{ConsultaError, ConsultaResult};
use async_trait::async_trait;
use deadpool_redis::{
    redis::{self, AsyncCommands},
    Config, Pool, PoolConfig, Runtime, Timeouts,
};
use shaku::Component;
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Keys requested per SCAN round trip.
pub const DEFAULT_SCAN_COUNT: usize = 100;

/// Upper bound on a liveness PING.
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound on a single command round trip.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(1);

/// Redis cache store over a deadpool connection pool.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    pool: Pool,
    #[shaku(default = DEFAULT_SCAN_COUNT)]
    scan_count: usize,
    #[shaku(default = DEFAULT_PING_TIMEOUT)]
    ping_timeout: Duration,
    #[shaku(default = DEFAULT_COMMAND_TIMEOUT)]
    command_timeout: Duration,
}

impl RedisCacheStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            scan_count: DEFAULT_SCAN_COUNT,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Builds the pool from configuration.
    ///
    /// No connection is opened here; the first command connects, bounded by
    /// the configured connect timeout.
    pub fn from_config(config: &RedisConfig) -> ConsultaResult<Self> {
        Ok(Self::new(Self::create_pool(config)?).with_command_timeout(config.command_timeout()))
    }

    /// Sets the upper bound on each command round trip.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Creates a Redis pool from configuration.
    pub fn create_pool(config: &RedisConfig) -> ConsultaResult<Pool> {
        info!(
            host = %config.host,
            port = config.port,
            tls = config.tls,
            pool_size = config.pool_size,
            "Creating Redis connection pool"
        );

        let mut timeouts = Timeouts::default();
        timeouts.wait = Some(config.connect_timeout());
        timeouts.create = Some(config.connect_timeout());
        timeouts.recycle = Some(config.connect_timeout());

        let mut pool_config = PoolConfig::new(config.pool_size);
        pool_config.timeouts = timeouts;

        let mut cfg = Config::from_url(config.url());
        cfg.pool = Some(pool_config);

        cfg.create_pool(Some(Runtime::Tokio1))
            .map_err(|e| ConsultaError::Configuration(format!("Invalid Redis configuration: {}", e)))
    }

    async fn get_conn(&self) -> ConsultaResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| ConsultaError::cache(format!("Failed to get Redis connection: {}", e)))
    }

    /// Awaits one command, mapping both transport errors and a server that
    /// stops answering to [`ConsultaError::CacheUnavailable`].
    async fn run<T, F>(&self, describe: impl FnOnce() -> String, fut: F) -> ConsultaResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ConsultaError::cache(format!("{} failed: {}", describe(), e))),
            Err(_) => Err(ConsultaError::cache(format!(
                "{} timed out after {}ms",
                describe(),
                self.command_timeout.as_millis()
            ))),
        }
    }

    async fn ping(&self) -> ConsultaResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| ConsultaError::cache(format!("PING failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> ConsultaResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        self.run(|| format!("GET '{}'", key), conn.get(key)).await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> ConsultaResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        self.run(
            || format!("SET '{}'", key),
            conn.set_ex::<_, _, ()>(key, value, ttl_secs),
        )
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete_all(&self, keys: &[String]) -> ConsultaResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;
        self.run(|| format!("DEL of {} keys", keys.len()), conn.del(keys))
            .await
    }

    async fn list_keys_by_prefix(&self, prefix: &str) -> ConsultaResult<Vec<String>> {
        let mut conn = self.get_conn().await?;
        let pattern = format!("{}*", escape_glob(prefix));

        // SCAN may return a key more than once across iterations.
        let mut keys = BTreeSet::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = self
                .run(
                    || format!("SCAN '{}'", pattern),
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&pattern)
                        .arg("COUNT")
                        .arg(self.scan_count)
                        .query_async(&mut conn),
                )
                .await?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Found {} keys matching '{}'", keys.len(), pattern);
        Ok(keys.into_iter().collect())
    }

    async fn is_connected(&self) -> bool {
        matches!(
            tokio::time::timeout(self.ping_timeout, self.ping()).await,
            Ok(Ok(()))
        )
    }

    async fn close(&self) {
        info!("Closing Redis connection pool...");
        self.pool.close();
        info!("Redis connection pool closed");
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheStore")
            .field("size", &status.size)
            .field("available", &status.available)
            .field("scan_count", &self.scan_count)
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}

/// Escapes glob metacharacters so a literal prefix can be used in MATCH.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
