//! Timeout configuration for store calls.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dependency::DependencyTag;
use crate::error::{DependencyError, StoreError};

/// Per-dependency timeouts, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Catalog store timeout.
    pub catalog: u64,
    /// Review aggregator timeout.
    pub reviews: u64,
}

impl TimeoutConfig {
    /// Get the timeout for a dependency.
    pub fn for_tag(&self, tag: DependencyTag) -> Duration {
        match tag {
            DependencyTag::Catalog => Duration::from_millis(self.catalog),
            DependencyTag::Reviews => Duration::from_millis(self.reviews),
        }
    }

    /// Name of the first dependency configured with a zero timeout.
    pub fn first_zero(&self) -> Option<DependencyTag> {
        [DependencyTag::Catalog, DependencyTag::Reviews]
            .into_iter()
            .find(|tag| self.for_tag(*tag).is_zero())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            catalog: DependencyTag::Catalog.default_timeout().as_millis() as u64,
            reviews: DependencyTag::Reviews.default_timeout().as_millis() as u64,
        }
    }
}

/// Run a store call under a timeout, tagging any failure with its dependency.
///
/// Dropping the returned future drops the inner call, which cancels it.
pub async fn guarded<T, F>(tag: DependencyTag, limit: Duration, call: F) -> Result<T, DependencyError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(DependencyError::Unavailable {
            dependency: tag,
            source,
        }),
        Err(_) => Err(DependencyError::TimedOut {
            dependency: tag,
            after: limit,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_tags() {
        let config = TimeoutConfig::default();
        assert_eq!(config.for_tag(DependencyTag::Catalog), Duration::from_secs(3));
        assert_eq!(config.first_zero(), None);
    }

    #[test]
    fn test_zero_timeout_detected() {
        let config = TimeoutConfig {
            catalog: 100,
            reviews: 0,
        };
        assert_eq!(config.first_zero(), Some(DependencyTag::Reviews));
    }

    #[tokio::test]
    async fn test_guarded_passes_value_through() {
        let value = guarded(DependencyTag::Catalog, Duration::from_millis(100), async {
            Ok::<_, StoreError>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_guarded_tags_store_errors() {
        let err = guarded(DependencyTag::Reviews, Duration::from_millis(100), async {
            Err::<(), _>(StoreError::Connection("refused".into()))
        })
        .await
        .unwrap_err();
        assert_eq!(err.dependency(), DependencyTag::Reviews);
        assert!(matches!(err, DependencyError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_guarded_times_out() {
        let err = guarded(
            DependencyTag::Catalog,
            Duration::from_millis(10),
            std::future::pending::<Result<(), StoreError>>(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DependencyError::TimedOut { .. }));
        assert!(err.to_string().contains("catalog timed out"));
    }
}
