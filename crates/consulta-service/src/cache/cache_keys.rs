//! Cache key builders.
//!
//! Every catalog key lives under the `productos:` namespace:
//! - `productos:populares`
//! - `productos:categoria:{category}` with the category lowercased

use std::fmt;

/// Namespace shared by all catalog keys.
pub const NAMESPACE: &str = "productos";

/// Prefix matching every key of the catalog namespace.
pub const NAMESPACE_PREFIX: &str = "productos:";

/// A key into the catalog cache namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of the popular-products list.
    #[must_use]
    pub fn popular() -> Self {
        Self(format!("{NAMESPACE}:populares"))
    }

    /// Key of a category listing. Categories differing only in case share a key.
    #[must_use]
    pub fn category(category: &str) -> Self {
        Self(format!("{NAMESPACE}:categoria:{}", normalize_category(category)))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Case-folds a category name for key derivation.
#[must_use]
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}
