//! Store interfaces for the external collaborators.
//!
//! The search core never talks to a database directly. A catalog store
//! evaluates predicates and a review aggregator summarizes reviews; both are
//! reached through these traits so they can be swapped for in-memory or
//! failing implementations in tests.

mod memory;

use async_trait::async_trait;
use thucduong_data::StoreError;

use crate::catalog::{Product, ReviewStats};
use crate::ids::ProductId;
use crate::search::Predicate;

pub use memory::{MemoryCatalog, MemoryReviews};

/// The authoritative product collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every product matching the predicate, in no particular order.
    ///
    /// One call is one evaluation: callers derive the page, the total and
    /// the facets from the same returned set.
    async fn find_matching(&self, predicate: &Predicate) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;
}

/// Per-product review statistics.
#[async_trait]
pub trait ReviewAggregator: Send + Sync {
    /// Approved-review statistics, or `None` when there are no approved reviews.
    async fn review_stats(&self, product_id: &ProductId) -> Result<Option<ReviewStats>, StoreError>;
}
