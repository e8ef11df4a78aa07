//! API response types.

use consulta_core::{ConsultaError, ErrorResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use tracing::error;

/// Message returned in place of error details when they are hidden.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Marker attached to responses produced from an [`AppError`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorDetails {
    /// Machine-readable code of the underlying error.
    pub code: &'static str,
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub ConsultaError);

impl From<ConsultaError> for AppError {
    fn from(err: ConsultaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.0.error_code();

        error!(code, error = %self.0, "Request failed");

        let mut response = (status, Json(ErrorResponse::from_error(&self.0))).into_response();
        response.extensions_mut().insert(ErrorDetails { code });
        response
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Formats a latency the way the catalog endpoints report it, e.g. `"12ms"`.
#[must_use]
pub fn format_latency(latency: Duration) -> String {
    format!("{}ms", latency.as_millis())
}
