//! Named TTL classes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Kind of cached value; each kind has its own lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlClass {
    /// A single product looked up by slug.
    ProductDetail,
    /// A filtered listing without free-text query.
    ProductList,
    /// The list of main categories.
    CategoryList,
    /// A listing driven by a free-text query.
    Search,
}

impl TtlClass {
    /// Key namespace for values of this class.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::ProductDetail => "product",
            Self::ProductList => "products",
            Self::CategoryList => "categories",
            Self::Search => "search",
        }
    }
}

impl std::fmt::Display for TtlClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductDetail => write!(f, "product_detail"),
            Self::ProductList => write!(f, "product_list"),
            Self::CategoryList => write!(f, "category_list"),
            Self::Search => write!(f, "search"),
        }
    }
}

/// TTL per class, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheTtlConfig {
    pub product_detail: u64,
    pub product_list: u64,
    pub category_list: u64,
    pub search: u64,
}

impl CacheTtlConfig {
    /// Get the TTL for a class.
    pub fn ttl(&self, class: TtlClass) -> Duration {
        let secs = match class {
            TtlClass::ProductDetail => self.product_detail,
            TtlClass::ProductList => self.product_list,
            TtlClass::CategoryList => self.category_list,
            TtlClass::Search => self.search,
        };
        Duration::from_secs(secs)
    }

    /// Reject zero lifetimes.
    pub fn validate(&self) -> Result<(), CacheError> {
        let classes = [
            TtlClass::ProductDetail,
            TtlClass::ProductList,
            TtlClass::CategoryList,
            TtlClass::Search,
        ];
        match classes.into_iter().find(|class| self.ttl(*class).is_zero()) {
            Some(class) => Err(CacheError::InvalidTtl(class)),
            None => Ok(()),
        }
    }
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            product_detail: 3600,
            product_list: 900,
            category_list: 86400,
            search: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheTtlConfig::default();
        assert_eq!(config.ttl(TtlClass::ProductDetail), Duration::from_secs(3600));
        assert_eq!(config.ttl(TtlClass::ProductList), Duration::from_secs(900));
        assert_eq!(config.ttl(TtlClass::CategoryList), Duration::from_secs(86400));
        assert_eq!(config.ttl(TtlClass::Search), Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = CacheTtlConfig {
            search: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidTtl(TtlClass::Search))));
    }
}
