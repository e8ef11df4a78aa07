//! HTTP middleware.

mod error_redaction;
mod logging;
mod timeout_envelope;

pub use error_redaction::redact_error_details;
pub use logging::logging_middleware;
pub use timeout_envelope::{timeout_envelope, TIMEOUT_MESSAGE};
