//! Application configuration structures.

use consulta_core::telemetry::{TelemetryConfig, DEFAULT_FILTER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest TTL accepted for cache entries (one day).
pub const MAX_CACHE_TTL_SECS: u64 = 86_400;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Cache-aside policy.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Service name reported by `/health`.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "consulta-rapida".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// Return internal error messages in response bodies.
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 10,
            cors_enabled: true,
            expose_error_details: true,
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the shutdown drain timeout as a Duration.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// PostgreSQL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub name: String,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection acquisition timeout in milliseconds.
    pub acquire_timeout_ms: u64,
    /// Idle connections are reaped after this many seconds.
    pub idle_timeout_secs: u64,
    /// Apply the bundled bootstrap migrations on startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "inventario_db".to_string(),
            user: "apprunner_user".to_string(),
            password: String::new(),
            min_connections: 0,
            max_connections: 10,
            acquire_timeout_ms: 2000,
            idle_timeout_secs: 30,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// Returns the acquisition timeout as a Duration.
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis host.
    pub host: String,
    /// Redis port.
    pub port: u16,
    /// Connect with TLS (`rediss://`).
    pub tls: bool,
    /// Connection pool size.
    pub pool_size: usize,
    /// Connect and checkout timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Upper bound on a single command round trip, in milliseconds.
    pub command_timeout_ms: u64,
    /// Use Redis; when disabled an in-process cache is used instead.
    pub enabled: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            tls: false,
            pool_size: 10,
            connect_timeout_ms: 5000,
            command_timeout_ms: 1000,
            enabled: true,
        }
    }
}

impl RedisConfig {
    /// Returns the connection URL derived from host, port and TLS flag.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.tls { "rediss" } else { "redis" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Returns the per-command timeout as a Duration.
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// Cache-aside policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied to every populated entry, in seconds.
    pub ttl_secs: u64,
    /// Row limit of the popular-products query.
    pub popular_limit: u32,
    /// Row limit of the category query.
    pub category_limit: u32,
    /// Also cache empty result sets.
    pub cache_empty_results: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            popular_limit: 20,
            category_limit: 50,
            cache_empty_results: false,
        }
    }
}

impl CacheConfig {
    /// Returns the entry TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing filter directive.
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
    /// Enable the Prometheus recorder.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_FILTER.to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Builds the tracing configuration for the named service.
    #[must_use]
    pub fn telemetry(&self, service_name: &str) -> TelemetryConfig {
        TelemetryConfig {
            service_name: service_name.to_string(),
            filter: self.log_level.clone(),
            json: self.log_format.eq_ignore_ascii_case("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.name, "inventario_db");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.acquire_timeout(), Duration::from_secs(2));
        assert_eq!(config.database.idle_timeout(), Duration::from_secs(30));
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.cache.popular_limit, 20);
        assert_eq!(config.cache.category_limit, 50);
        assert!(!config.cache.cache_empty_results);
    }

    #[test]
    fn test_redis_url_scheme_follows_tls() {
        let mut redis = RedisConfig::default();
        assert_eq!(redis.url(), "redis://localhost:6379");

        redis.tls = true;
        redis.host = "cache.internal".to_string();
        assert_eq!(redis.url(), "rediss://cache.internal:6379");
    }

    #[test]
    fn test_redis_command_timeout_is_tighter_than_connect() {
        let redis = RedisConfig::default();
        assert_eq!(redis.command_timeout(), Duration::from_secs(1));
        assert!(redis.command_timeout() < redis.connect_timeout());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_json_log_format() {
        let mut observability = ObservabilityConfig::default();
        assert!(!observability.telemetry("svc").json);

        observability.log_format = "JSON".to_string();
        let telemetry = observability.telemetry("svc");
        assert!(telemetry.json);
        assert_eq!(telemetry.service_name, "svc");
    }
}
