//! Catalog service implementations.
//!
//! Trait definitions live in the parent module (e.g. `catalog_service.rs`).

pub mod catalog_service_impl;

pub use catalog_service_impl::{CatalogServiceComponent, CatalogServiceComponentParameters};
