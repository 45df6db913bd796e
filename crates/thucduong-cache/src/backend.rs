//! Cache storage backends.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::clock::add_duration;
use crate::error::{CacheError, CacheResult};

/// A stored value with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    /// JSON-encoded value.
    pub payload: Vec<u8>,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
    /// When the entry stops being served.
    pub expires_at: DateTime<Utc>,
}

impl CachedEntry {
    /// Create an entry that expires `ttl` after `now`.
    pub fn new(payload: Vec<u8>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            payload,
            created_at: now,
            expires_at: add_duration(now, ttl),
        }
    }

    /// Check if the entry has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime at `now`.
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Storage seam for the result cache.
///
/// Backends are plain key/value stores; expiry is enforced by `ResultCache`
/// on read, so a backend without native TTL support is still correct.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get an entry.
    async fn get(&self, key: &str) -> CacheResult<Option<CachedEntry>>;

    /// Store an entry, replacing any previous one.
    async fn set(&self, key: &str, entry: CachedEntry) -> CacheResult<()>;

    /// Remove an entry.
    async fn delete(&self, key: &str) -> CacheResult<()>;
}

/// In-process backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, CachedEntry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> CacheError {
    CacheError::Storage("memory backend lock poisoned".to_string())
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<CachedEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, entry: CachedEntry) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
