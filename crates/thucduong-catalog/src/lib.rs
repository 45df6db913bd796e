//! Product search and listing for the Thực Dưỡng storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: Products, pricing, reviews and review statistics
//! - **Search**: Filter planning, predicates, faceted result assembly
//! - **Store**: Catalog and review store traits with in-memory implementations
//! - **Service**: `SearchService`, which puts a TTL cache in front of it all
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use thucduong_catalog::prelude::*;
//!
//! let config = SearchConfig::load("search.toml")?;
//! let service = SearchService::new(
//!     &config,
//!     Arc::new(MemoryCatalog::new()),
//!     Arc::new(MemoryReviews::new()),
//!     ResultCache::in_memory(),
//! );
//!
//! let page = service
//!     .search_products(
//!         &FilterRequest::new()
//!             .with_category("Gạo lứt")
//!             .with_price_range(None, Some(50000))
//!             .with_pagination(1, 20),
//!     )
//!     .await?;
//! println!("{} of {} products", page.len(), page.total());
//! ```

pub mod config;
pub mod error;
pub mod ids;

pub mod catalog;
pub mod search;
pub mod service;
pub mod store;

pub use config::SearchConfig;
pub use error::{CatalogError, ErrorKind};
pub use ids::*;
pub use service::SearchService;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::error::{CatalogError, ErrorKind};
    pub use crate::ids::*;
    pub use crate::service::SearchService;

    // Catalog
    pub use crate::catalog::{
        CategoryInfo, Currency, Flags, Inventory, Pricing, Product, ProductDraft, Ratings, Review,
        ReviewStats, ReviewStatus,
    };

    // Search
    pub use crate::search::{
        AvailableFilters, EnrichedProduct, FilterPlanner, FilterRequest, Pagination, ResultPage,
        SearchPlan, SortDirection, SortField, SortSpec,
    };

    // Store
    pub use crate::store::{CatalogStore, MemoryCatalog, MemoryReviews, ReviewAggregator};

    pub use thucduong_cache::ResultCache;
}
