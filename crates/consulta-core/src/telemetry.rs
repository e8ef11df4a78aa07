//! Tracing subscriber initialization.
//!
//! Installs an `EnvFilter`-driven registry with either a human-readable or a
//! JSON formatting layer. `RUST_LOG` always wins over the configured level.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ConsultaResult;
use serde::{Deserialize, Serialize};

/// Default filter directive used when neither `RUST_LOG` nor a level is set.
pub const DEFAULT_FILTER: &str = "info,consulta=debug,tower_http=debug";

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Filter directive (e.g. `info` or `info,consulta=debug`).
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of pretty output.
    #[serde(default)]
    pub json: bool,
}

fn default_service_name() -> String {
    "consulta-rapida".to_string()
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            filter: default_filter(),
            json: false,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Fails if a global subscriber has already been installed.
#[cfg(feature = "telemetry")]
pub fn init_telemetry(config: &TelemetryConfig) -> ConsultaResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| crate::ConsultaError::Internal(format!("Failed to init tracing: {}", e)))?;

    tracing::info!(
        service_name = %config.service_name,
        json = config.json,
        "Tracing initialized"
    );

    Ok(())
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_telemetry(_config: &TelemetryConfig) -> ConsultaResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "consulta-rapida");
        assert_eq!(config.filter, DEFAULT_FILTER);
        assert!(!config.json);
    }
}
