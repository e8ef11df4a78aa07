//! Gives timed-out requests the standard error body.

use crate::responses::ErrorDetails;
use consulta_core::ErrorResponse;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

/// Message returned when a request exceeds the server's request timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Rewrites the bare `408` produced by the timeout layer into
/// `{success:false, error}`.
///
/// Must wrap the timeout layer. Handler errors already carrying
/// [`ErrorDetails`] pass through untouched.
pub async fn timeout_envelope(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    if response.status() != StatusCode::REQUEST_TIMEOUT
        || response.extensions().get::<ErrorDetails>().is_some()
    {
        return response;
    }

    warn!(path = %path, "Request timed out");

    let mut response =
        (StatusCode::REQUEST_TIMEOUT, Json(ErrorResponse::new(TIMEOUT_MESSAGE))).into_response();
    response.extensions_mut().insert(ErrorDetails { code: "REQUEST_TIMEOUT" });
    response
}
