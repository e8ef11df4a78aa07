//! # Consulta Core
//!
//! Core types and error definitions shared by every layer of the
//! Consulta Rápida catalog cache: the product projection, response
//! provenance, and the unified error type.

pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
