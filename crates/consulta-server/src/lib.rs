//! # Consulta Server Library
//!
//! Dependency injection wiring, application lifecycle, and startup
//! utilities for the Consulta Rápida server.

pub mod app;
pub mod di;
pub mod shutdown;
pub mod startup;
