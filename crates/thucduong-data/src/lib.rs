//! Data access plumbing for the external collaborators of the search core.
//!
//! This crate provides:
//! - `DependencyTag` - The external services a search reads from
//! - `TimeoutConfig` - Per-dependency timeouts
//! - `guarded` - Runs a store call under its timeout
//! - `StoreError` / `DependencyError` - Store failures as seen by callers

mod dependency;
mod error;
mod timeout;

pub use dependency::*;
pub use error::*;
pub use timeout::*;
