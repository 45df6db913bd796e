//! Store and dependency error types.

use std::time::Duration;

use crate::dependency::DependencyTag;

/// Error reported by a store implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store was reached but the operation failed.
    #[error("Query error: {0}")]
    Query(String),
}

/// A dependency could not serve a request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DependencyError {
    /// The dependency returned an error.
    #[error("{dependency} unavailable: {source}")]
    Unavailable {
        dependency: DependencyTag,
        #[source]
        source: StoreError,
    },

    /// The dependency did not answer in time.
    #[error("{dependency} timed out after {after:?}")]
    TimedOut {
        dependency: DependencyTag,
        after: Duration,
    },
}

impl DependencyError {
    /// The dependency that failed.
    pub fn dependency(&self) -> DependencyTag {
        match self {
            Self::Unavailable { dependency, .. } | Self::TimedOut { dependency, .. } => *dependency,
        }
    }
}
