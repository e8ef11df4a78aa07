//! Prometheus metrics for the cache-aside path.

use consulta_core::DataSource;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names.
pub mod names {
    /// Cache reads by outcome (hit, miss, unavailable, corrupt).
    pub const CACHE_LOOKUPS_TOTAL: &str = "consulta_cache_lookups_total";
    /// Failed cache write-backs.
    pub const CACHE_WRITE_FAILURES_TOTAL: &str = "consulta_cache_write_failures_total";
    /// Keys removed by namespace invalidation.
    pub const CACHE_INVALIDATED_KEYS_TOTAL: &str = "consulta_cache_invalidated_keys_total";
    /// Resolution latency in seconds, labelled by data source.
    pub const CATALOG_RESOLVE_SECONDS: &str = "consulta_catalog_resolve_seconds";
}

/// Lookup outcome label values.
pub mod outcome {
    pub const HIT: &str = "hit";
    pub const MISS: &str = "miss";
    pub const UNAVAILABLE: &str = "unavailable";
    pub const CORRUPT: &str = "corrupt";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_LOOKUPS_TOTAL,
        "Total number of cache lookups by outcome"
    );
    describe_counter!(
        names::CACHE_WRITE_FAILURES_TOTAL,
        "Total number of failed cache write-backs"
    );
    describe_counter!(
        names::CACHE_INVALIDATED_KEYS_TOTAL,
        "Total number of cache keys removed by invalidation"
    );
    describe_histogram!(
        names::CATALOG_RESOLVE_SECONDS,
        "Catalog resolution latency in seconds"
    );
}

/// Cache metrics recorder.
#[derive(Debug, Clone, Copy)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache lookup.
    pub fn lookup(outcome: &'static str) {
        counter!(names::CACHE_LOOKUPS_TOTAL, "outcome" => outcome).increment(1);
    }

    /// Record a failed write-back.
    pub fn write_failed() {
        counter!(names::CACHE_WRITE_FAILURES_TOTAL).increment(1);
    }

    /// Record keys removed by invalidation.
    pub fn invalidated(count: u64) {
        counter!(names::CACHE_INVALIDATED_KEYS_TOTAL).increment(count);
    }

    /// Record a completed resolution.
    pub fn resolved(source: DataSource, latency: Duration) {
        histogram!(names::CATALOG_RESOLVE_SECONDS, "source" => source.as_str())
            .record(latency.as_secs_f64());
    }
}
