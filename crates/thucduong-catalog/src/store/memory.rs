//! In-memory stores.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thucduong_data::StoreError;

use crate::catalog::{Product, Review, ReviewStats};
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::search::Predicate;
use crate::store::{CatalogStore, ReviewAggregator};

fn poisoned() -> StoreError {
    StoreError::Query("in-memory store lock poisoned".to_string())
}

/// Catalog held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<BTreeMap<ProductId, Product>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from products, enforcing slug/sku uniqueness.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let catalog = Self::new();
        for product in products {
            catalog.upsert(product)?;
        }
        Ok(catalog)
    }

    /// Insert or replace a product.
    ///
    /// Fails when another product already uses the same slug or sku.
    pub fn upsert(&self, product: Product) -> Result<(), CatalogError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| CatalogError::validation("catalog lock poisoned"))?;

        let clash = products.values().find(|other| {
            other.id != product.id && (other.slug == product.slug || other.sku == product.sku)
        });
        if let Some(other) = clash {
            return Err(CatalogError::validation(format!(
                "slug or sku of {} already used by {}",
                product.id, other.id
            )));
        }

        products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Mark a product deleted. Returns `false` if it does not exist.
    pub fn soft_delete(&self, id: &ProductId, at: DateTime<Utc>) -> bool {
        let Ok(mut products) = self.products.write() else {
            return false;
        };
        match products.get_mut(id) {
            Some(product) => {
                product.deleted_at = Some(at);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn find_matching(&self, predicate: &Predicate) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products
            .values()
            .filter(|product| predicate.matches(product))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.values().find(|product| product.slug == slug).cloned())
    }
}

/// Reviews held in process memory.
#[derive(Debug, Default)]
pub struct MemoryReviews {
    reviews: RwLock<Vec<Review>>,
}

impl MemoryReviews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reviews(reviews: impl IntoIterator<Item = Review>) -> Self {
        Self {
            reviews: RwLock::new(reviews.into_iter().collect()),
        }
    }

    pub fn add(&self, review: Review) {
        if let Ok(mut reviews) = self.reviews.write() {
            reviews.push(review);
        }
    }
}

#[async_trait]
impl ReviewAggregator for MemoryReviews {
    async fn review_stats(&self, product_id: &ProductId) -> Result<Option<ReviewStats>, StoreError> {
        let reviews = self.reviews.read().map_err(|_| poisoned())?;
        Ok(ReviewStats::from_reviews(
            reviews.iter().filter(|review| review.product_id == *product_id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductDraft, ReviewStatus};
    use crate::search::Clause;

    fn product(id: &str, slug: &str, sku: &str) -> Product {
        ProductDraft::new(id, slug, sku, "Trà sen", "Trà", 80000).build().unwrap()
    }

    #[test]
    fn test_unique_slug_and_sku() {
        let catalog = MemoryCatalog::new();
        catalog.upsert(product("p1", "tra-sen", "TS-1")).unwrap();
        assert!(catalog.upsert(product("p2", "tra-sen", "TS-2")).is_err());
        assert!(catalog.upsert(product("p2", "tra-sen-2", "TS-1")).is_err());
        // Replacing the same product is fine.
        catalog.upsert(product("p1", "tra-sen", "TS-1")).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listing() {
        let catalog = MemoryCatalog::with_products([product("p1", "tra-sen", "TS-1")]).unwrap();
        assert_eq!(catalog.find_matching(&Predicate::listed()).await.unwrap().len(), 1);

        assert!(catalog.soft_delete(&ProductId::new("p1"), Utc::now()));
        assert!(!catalog.soft_delete(&ProductId::new("missing"), Utc::now()));
        assert!(catalog.find_matching(&Predicate::listed()).await.unwrap().is_empty());
        assert!(catalog.find_by_slug("tra-sen").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_matching_applies_predicate() {
        let catalog = MemoryCatalog::with_products([
            product("p1", "a", "A"),
            ProductDraft::new("p2", "b", "B", "Gạo lứt", "Gạo lứt", 55000).build().unwrap(),
        ])
        .unwrap();
        let found = catalog
            .find_matching(&Predicate::listed().and(Clause::Category("Gạo lứt".into())))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "p2");
    }

    #[tokio::test]
    async fn test_review_stats_per_product() {
        let reviews = MemoryReviews::new();
        reviews.add(Review::new("r1", "p1", 5, ReviewStatus::Approved).unwrap());
        reviews.add(Review::new("r2", "p1", 3, ReviewStatus::Approved).unwrap());
        reviews.add(Review::new("r3", "p2", 5, ReviewStatus::Pending).unwrap());

        let stats = reviews.review_stats(&ProductId::new("p1")).await.unwrap().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, 4.0);
        assert_eq!(reviews.review_stats(&ProductId::new("p2")).await.unwrap(), None);
    }
}
