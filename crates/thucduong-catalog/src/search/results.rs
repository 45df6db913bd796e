//! Result pages, facets and pagination.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ReviewStats};
use crate::search::planner::PageWindow;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub limit: i64,
    /// Total number of matching products.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(window: PageWindow, total: u64) -> Self {
        let limit = window.limit.max(1) as u64;
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(limit)
        };

        Self {
            page: window.page,
            limit: window.limit,
            total,
            total_pages,
            has_next: (window.page as u64) < total_pages,
            has_prev: window.page > 1,
        }
    }
}

/// A product with its computed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percentage: f64,
    /// Average of approved reviews; `None` without any.
    pub computed_rating: Option<f64>,
    /// Number of approved reviews; `None` without any.
    pub review_count: Option<u64>,
}

impl EnrichedProduct {
    pub fn new(product: Product, stats: Option<ReviewStats>) -> Self {
        Self {
            discount_percentage: product.discount_percentage(),
            computed_rating: stats.map(|s| s.average),
            review_count: stats.map(|s| s.count),
            product,
        }
    }
}

/// Filter values available for refining the current match set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableFilters {
    /// Distinct main categories, sorted.
    pub categories: Vec<String>,
    /// Union of product tags, sorted.
    pub tags: Vec<String>,
    /// Lowest regular price; `None` when nothing matched.
    pub min_price: Option<i64>,
    /// Highest regular price; `None` when nothing matched.
    pub max_price: Option<i64>,
}

impl AvailableFilters {
    /// Summarize a match set.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();
        let mut min_price: Option<i64> = None;
        let mut max_price: Option<i64> = None;

        for product in products {
            categories.insert(product.category.main.clone());
            tags.extend(product.tags.iter().cloned());
            let price = product.pricing.regular;
            min_price = Some(min_price.map_or(price, |min| min.min(price)));
            max_price = Some(max_price.map_or(price, |max| max.max(price)));
        }

        Self {
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
            min_price,
            max_price,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Products on this page, in sort order.
    pub items: Vec<EnrichedProduct>,
    pub metadata: Pagination,
    /// Computed over the whole match set, not just this page.
    pub available_filters: AvailableFilters,
}

impl ResultPage {
    pub fn total(&self) -> u64 {
        self.metadata.total
    }

    /// IDs of the products on this page, in order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.product.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;

    fn product(id: &str, category: &str, regular: i64, tags: &[&str]) -> Product {
        ProductDraft::new(id, id, id, id, category, regular)
            .tags(tags.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(PageWindow { page: 2, limit: 10 }, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn test_pagination_last_and_empty() {
        let p = Pagination::new(PageWindow { page: 5, limit: 10 }, 45);
        assert!(!p.has_next);

        let p = Pagination::new(PageWindow { page: 1, limit: 20 }, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_available_filters() {
        let products = vec![
            product("a", "Gạo lứt", 55000, &["organic", "whole-grain"]),
            product("b", "Trà", 120000, &["organic", "herbal"]),
            product("c", "Gạo lứt", 30000, &[]),
        ];
        let filters = AvailableFilters::from_products(&products);
        assert_eq!(filters.categories, vec!["Gạo lứt", "Trà"]);
        assert_eq!(filters.tags, vec!["herbal", "organic", "whole-grain"]);
        assert_eq!(filters.min_price, Some(30000));
        assert_eq!(filters.max_price, Some(120000));
    }

    #[test]
    fn test_available_filters_empty() {
        let filters = AvailableFilters::from_products(&[]);
        assert_eq!(filters, AvailableFilters::default());
        assert_eq!(filters.min_price, None);
    }

    #[test]
    fn test_enriched_without_reviews_has_null_stats() {
        let item = EnrichedProduct::new(product("a", "Trà", 1000, &[]), None);
        assert_eq!(item.computed_rating, None);
        assert_eq!(item.review_count, None);

        let json = serde_json::to_value(&item).unwrap();
        assert!(json["computed_rating"].is_null());
        assert_eq!(json["id"], "a");
    }

    #[test]
    fn test_enriched_with_reviews() {
        let stats = ReviewStats { average: 4.5, count: 2 };
        let item = EnrichedProduct::new(product("a", "Trà", 1000, &[]), Some(stats));
        assert_eq!(item.computed_rating, Some(4.5));
        assert_eq!(item.review_count, Some(2));
    }
}
