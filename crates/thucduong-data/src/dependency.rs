//! Dependency tagging for semantic categorization.

use std::time::Duration;

/// External services the search pipeline depends on.
///
/// Each tag carries a default timeout used when no configuration overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// The catalog store holding product documents.
    Catalog,
    /// The review aggregator (approved-review statistics).
    Reviews,
}

impl DependencyTag {
    /// Get the default timeout for this dependency.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_millis(3000),
            Self::Reviews => Duration::from_millis(3000),
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Reviews => "reviews",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(DependencyTag::Catalog.to_string(), "catalog");
        assert_eq!(DependencyTag::Reviews.to_string(), "reviews");
    }

    #[test]
    fn test_default_timeouts_are_a_few_seconds() {
        assert_eq!(DependencyTag::Catalog.default_timeout(), Duration::from_secs(3));
        assert_eq!(DependencyTag::Reviews.default_timeout(), Duration::from_secs(3));
    }
}
