//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Consulta.
///
/// Variants follow the failure taxonomy of the cache-aside core: transport
/// failures on either store, query failures, and payload (de)serialization.
#[derive(Error, Debug)]
pub enum ConsultaError {
    // ============ Cache Errors ============
    /// Transport or connection error while talking to the cache.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    // ============ Database Errors ============
    /// Pool exhaustion, acquisition timeout, or a dropped connection.
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    /// The database rejected or failed to execute a query.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    // ============ Payload Errors ============
    /// A value could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConsultaError {
    /// Returns the HTTP status code for this error.
    ///
    /// Every failure is reported as a 500, matching the catalog API contract.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::CacheUnavailable(_)
            | Self::DatabaseUnavailable(_)
            | Self::QueryFailed(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::DatabaseUnavailable(_) => "DATABASE_UNAVAILABLE",
            Self::QueryFailed(_) => "QUERY_FAILED",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a cache-unavailable error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::CacheUnavailable(_) | Self::DatabaseUnavailable(_))
    }

    /// Checks if this error came from the cache transport.
    #[must_use]
    pub const fn is_cache_unavailable(&self) -> bool {
        matches!(self, Self::CacheUnavailable(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ConsultaError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::DatabaseUnavailable(err.to_string()),
            _ => Self::QueryFailed(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConsultaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error body for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body carrying the error's message.
    #[must_use]
    pub fn from_error(error: &ConsultaError) -> Self {
        Self::new(error.to_string())
    }

    /// Creates an error body with an arbitrary message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

impl From<&ConsultaError> for ErrorResponse {
    fn from(error: &ConsultaError) -> Self {
        Self::from_error(error)
    }
}
