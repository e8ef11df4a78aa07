//! # Consulta Repository
//!
//! Persistent store adapter for the product catalog.
//!
//! ```text
//! CatalogService
//!   ↓  Arc<dyn ProductRepository>   (query interface)
//! PgProductRepository               (bound-parameter SQL)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool                      (sqlx PgPool: bounded, idle reap, acquire timeout)
//!   ↓
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
