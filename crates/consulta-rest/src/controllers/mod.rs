//! REST API controllers.

pub mod cache_controller;
pub mod health_controller;
pub mod product_controller;
pub mod stats_controller;

pub use cache_controller::CacheClearedResponse;
pub use health_controller::HealthResponse;
pub use product_controller::{CategoryProductsResponse, ProductListResponse};
pub use stats_controller::{PostgresStats, RedisStats, StatsResponse};
