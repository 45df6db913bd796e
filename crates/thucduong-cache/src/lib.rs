//! Result caching for the catalog search core.
//!
//! This crate provides:
//! - `ResultCache` - Read-through cache with lazy TTL expiry
//! - `CacheBackend` - Storage seam (`MemoryBackend` in process)
//! - `CacheKeyBuilder` - Normalized cache key composition
//! - `CacheTtlConfig` - Named TTL classes
//! - `Clock` - Injectable time source
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use thucduong_cache::{CacheKeyBuilder, ResultCache, TtlClass};
//!
//! let cache = ResultCache::in_memory();
//! let key = CacheKeyBuilder::new(TtlClass::Search.namespace())
//!     .text("category", Some("Gạo lứt"))
//!     .number("page", Some(1))
//!     .build();
//!
//! cache.put(&key, &page, Duration::from_secs(600)).await?;
//! let cached: Option<ResultPage> = cache.get(&key).await?;
//! ```

mod backend;
mod cache;
mod clock;
mod error;
mod key;
mod policy;

pub use backend::*;
pub use cache::*;
pub use clock::*;
pub use error::*;
pub use key::*;
pub use policy::*;
