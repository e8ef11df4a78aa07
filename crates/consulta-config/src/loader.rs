//! Configuration loader with layered sources.

use crate::{AppConfig, MAX_CACHE_TTL_SECS};
use config::{Config, ConfigError, Environment, File};
use consulta_core::ConsultaError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Flat environment variables honoured for compatibility with earlier
/// deployments, mapped to their configuration key.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("REDIS_HOST", "redis.host"),
    ("REDIS_PORT", "redis.port"),
    ("REDIS_TLS", "redis.tls"),
    ("DB_HOST", "database.host"),
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_PORT", "database.port"),
    ("PORT", "server.port"),
];

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `CONSULTA__` prefix
    /// 5. The flat variables in [`LEGACY_ENV_VARS`]
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ConsultaError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let config_dir = config_dir.into();
        let config = Self::load_with(&config_dir, |name| std::env::var(name).ok())?;

        Ok(Self { config, config_dir })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ConsultaError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the directory the configuration was read from.
    #[must_use]
    pub fn config_dir(&self) -> &str {
        &self.config_dir
    }

    /// Loads configuration, resolving flat variables through `lookup`.
    pub fn load_with<F>(config_dir: &str, lookup: F) -> Result<AppConfig, ConsultaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("CONSULTA_ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // 1-3. Files, lowest precedence first
        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        // 4. Override with prefixed environment variables
        builder = builder.add_source(
            Environment::with_prefix("CONSULTA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        // 5. Flat variables
        for (var, key) in LEGACY_ENV_VARS {
            if let Some(value) = lookup(var) {
                debug!("Applying {} to {}", var, key);
                builder = builder
                    .set_override_option(*key, Some(value))
                    .map_err(config_error_to_consulta_error)?;
            }
        }

        let mut app_config: AppConfig = builder
            .build()
            .map_err(config_error_to_consulta_error)?
            .try_deserialize()
            .map_err(config_error_to_consulta_error)?;

        app_config.app.environment = environment;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), ConsultaError> {
        if config.server.port == 0 {
            return Err(ConsultaError::Configuration("Server port must be non-zero".to_string()));
        }

        if config.database.host.is_empty() {
            return Err(ConsultaError::Configuration("Database host is required".to_string()));
        }

        if config.database.max_connections == 0 {
            return Err(ConsultaError::Configuration(
                "Database max_connections must be at least 1".to_string(),
            ));
        }

        if config.database.min_connections > config.database.max_connections {
            return Err(ConsultaError::Configuration(format!(
                "Database min_connections ({}) exceeds max_connections ({})",
                config.database.min_connections, config.database.max_connections
            )));
        }

        if config.cache.ttl_secs == 0 {
            return Err(ConsultaError::Configuration("Cache TTL must be positive".to_string()));
        }

        if config.cache.ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConsultaError::Configuration(format!(
                "Cache TTL ({}s) exceeds the maximum of {}s",
                config.cache.ttl_secs, MAX_CACHE_TTL_SECS
            )));
        }

        if config.redis.command_timeout_ms == 0 {
            return Err(ConsultaError::Configuration(
                "Redis command_timeout_ms must be positive".to_string(),
            ));
        }

        if config.database.password.is_empty() {
            warn!("Database password is empty");
        }

        Ok(())
    }
}

fn config_error_to_consulta_error(err: ConfigError) -> ConsultaError {
    ConsultaError::Configuration(err.to_string())
}
