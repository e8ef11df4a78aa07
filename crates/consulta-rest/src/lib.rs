//! # Consulta REST
//!
//! HTTP surface of the catalog cache: product reads, cache invalidation,
//! diagnostics, and health probes.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
