//! Response provenance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the data of a catalog response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Served from the key-value cache.
    Cache,
    /// Recomputed from the relational store.
    Database,
}

impl DataSource {
    /// Returns the wire name of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Database => "database",
        }
    }

    /// Returns true when the response was served from cache.
    #[must_use]
    pub const fn is_cache(self) -> bool {
        matches!(self, Self::Cache)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
