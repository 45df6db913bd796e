//! Cache error types.

use crate::policy::TtlClass;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur when using the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Failed to serialize/deserialize a cache entry.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// A TTL class is configured with a zero lifetime.
    #[error("TTL for {0} must be greater than zero")]
    InvalidTtl(TtlClass),
}
