//! Catalog error types.

use thiserror::Error;
use thucduong_data::DependencyError;

/// Stable classification of a `CatalogError`, for callers that map errors
/// onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    DataIntegrity,
    DependencyUnavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::DataIntegrity => "data_integrity",
            ErrorKind::DependencyUnavailable => "dependency_unavailable",
        }
    }
}

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A request or a record under construction is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored record violates a catalog invariant.
    #[error("Data integrity error for product {product_id}: {reason}")]
    DataIntegrity { product_id: String, reason: String },

    /// The catalog store or review aggregator could not answer.
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(#[from] DependencyError),
}

impl CatalogError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::Validation,
            CatalogError::DataIntegrity { .. } => ErrorKind::DataIntegrity,
            CatalogError::DependencyUnavailable(_) => ErrorKind::DependencyUnavailable,
        }
    }

    /// Whether the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::DependencyUnavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use thucduong_data::DependencyTag;

    #[test]
    fn test_kinds_and_retry() {
        let err = CatalogError::validation("limit must be at least 1");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retryable());

        let err: CatalogError = DependencyError::TimedOut {
            dependency: DependencyTag::Catalog,
            after: Duration::from_secs(3),
        }
        .into();
        assert_eq!(err.kind().as_str(), "dependency_unavailable");
        assert!(err.is_retryable());
    }
}
