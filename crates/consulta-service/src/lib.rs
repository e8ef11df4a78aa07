//! # Consulta Service
//!
//! Cache-aside coordination for the product catalog.
//! Contains the cache store adapters, the catalog resolver, namespace
//! invalidation, and diagnostics.

pub mod cache;
pub mod catalog_service;
pub mod diagnostics;
pub mod dto;
pub mod r#impl;
pub mod invalidation;
pub mod metrics;

pub use cache::*;
pub use catalog_service::*;
pub use diagnostics::*;
pub use dto::*;
pub use r#impl::*;
pub use invalidation::*;
