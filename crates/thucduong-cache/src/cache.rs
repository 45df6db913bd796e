//! Read-through result cache with lazy expiry.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{CacheBackend, CachedEntry, MemoryBackend};
use crate::clock::{Clock, SystemClock};
use crate::error::CacheResult;
use crate::key::CacheKey;

/// Status of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Fresh cache hit.
    Hit,
    /// Nothing stored under the key.
    Miss,
    /// An entry existed but its TTL had run out.
    Expired,
    /// The backend failed; treated as a miss.
    Error,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// TTL cache in front of an expensive computation.
///
/// Entries are immutable once written; concurrent writers of the same key
/// race and the last one wins, which is fine because they hold the same
/// recomputed value.
#[derive(Clone)]
pub struct ResultCache {
    backend: Arc<dyn CacheBackend>,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    /// Create a cache over a backend, using wall-clock time.
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a cache backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get a value if present and not expired.
    ///
    /// Expired entries are removed best-effort; a failed removal is only logged.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> CacheResult<Option<T>> {
        let Some(entry) = self.backend.get(key.as_str()).await? else {
            debug!(key = %key, status = %CacheStatus::Miss, "cache lookup");
            return Ok(None);
        };

        if entry.is_expired(self.clock.now()) {
            debug!(key = %key, status = %CacheStatus::Expired, "cache lookup");
            if let Err(e) = self.backend.delete(key.as_str()).await {
                warn!(key = %key, error = %e, "failed to evict expired cache entry");
            }
            return Ok(None);
        }

        let value = serde_json::from_slice(&entry.payload)?;
        debug!(key = %key, status = %CacheStatus::Hit, "cache lookup");
        Ok(Some(value))
    }

    /// Store a value that expires `ttl` from now.
    pub async fn put<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) -> CacheResult<()> {
        let payload = serde_json::to_vec(value)?;
        let entry = CachedEntry::new(payload, self.clock.now(), ttl);
        self.backend.set(key.as_str(), entry).await
    }

    /// Like `get`, but a failing cache reads as a miss.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, status = %CacheStatus::Error, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Like `put`, but a failing cache is only logged.
    pub async fn store<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) {
        if let Err(e) = self.put(key, value, ttl).await {
            warn!(key = %key, error = %e, "cache write failed");
        }
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache").field("clock", &self.clock).finish_non_exhaustive()
    }
}
