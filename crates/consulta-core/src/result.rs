//! Result type aliases for Consulta.

use crate::ConsultaError;

/// A specialized `Result` type for Consulta operations.
pub type ConsultaResult<T> = Result<T, ConsultaError>;
