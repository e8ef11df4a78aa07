//! Hides internal error messages from response bodies.

use crate::responses::{ErrorDetails, GENERIC_ERROR_MESSAGE};
use consulta_core::ErrorResponse;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Replaces the body of every error response with a fixed message.
///
/// The detailed message has already been logged by the error conversion.
pub async fn redact_error_details(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;

    if response.extensions().get::<ErrorDetails>().is_none() {
        return response;
    }

    let status = response.status();
    (status, Json(ErrorResponse::new(GENERIC_ERROR_MESSAGE))).into_response()
}
