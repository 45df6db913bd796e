//! Catalog module.
//!
//! Contains product documents, pricing and review statistics.

mod pricing;
mod product;
mod review;

pub use pricing::{Currency, Pricing};
pub use product::{CategoryInfo, Flags, Inventory, Product, ProductDraft, Ratings};
pub use review::{Review, ReviewStats, ReviewStatus};
