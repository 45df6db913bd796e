//! Product documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Pricing;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Category placement of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Main category (e.g. "Gạo lứt").
    pub main: String,
    /// Optional sub-category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Tags attached at category level.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Stock levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub quantity: i64,
}

/// Stored rating aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ratings {
    pub average: f64,
    pub count: u64,
}

/// Visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags {
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Stock keeping unit (unique).
    pub sku: String,
    pub name: String,
    pub category: CategoryInfo,
    /// Tags for filtering/search.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Extra terms matched by free-text queries.
    #[serde(default)]
    pub search_keywords: Vec<String>,
    pub pricing: Pricing,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub ratings: Ratings,
    #[serde(default)]
    pub flags: Flags,
    /// Number of units sold.
    #[serde(default)]
    pub purchased: u64,
    pub created_at: DateTime<Utc>,
    /// Set when the product is soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product may appear in listings.
    pub fn is_listed(&self) -> bool {
        self.flags.active && self.deleted_at.is_none()
    }

    pub fn discount_percentage(&self) -> f64 {
        self.pricing.discount_percentage()
    }

    /// Check invariants of a record read back from a store.
    ///
    /// Records built through `ProductDraft` always pass; stored documents can
    /// still be written by other tools and are checked before use.
    pub fn check_integrity(&self) -> Result<(), CatalogError> {
        self.pricing
            .check()
            .map_err(|reason| CatalogError::DataIntegrity {
                product_id: self.id.to_string(),
                reason,
            })
    }
}

/// Validated construction of a `Product`.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    id: ProductId,
    slug: String,
    sku: String,
    name: String,
    category: CategoryInfo,
    tags: Vec<String>,
    search_keywords: Vec<String>,
    regular: i64,
    sale: Option<i64>,
    inventory: Inventory,
    ratings: Ratings,
    flags: Flags,
    purchased: u64,
    created_at: DateTime<Utc>,
}

impl ProductDraft {
    /// Start a draft for an active product created now.
    pub fn new(
        id: impl Into<ProductId>,
        slug: impl Into<String>,
        sku: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        regular: i64,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            sku: sku.into(),
            name: name.into(),
            category: CategoryInfo {
                main: category.into(),
                sub: None,
                tags: Vec::new(),
            },
            tags: Vec::new(),
            search_keywords: Vec::new(),
            regular,
            sale: None,
            inventory: Inventory::default(),
            ratings: Ratings::default(),
            flags: Flags {
                active: true,
                featured: false,
            },
            purchased: 0,
            created_at: Utc::now(),
        }
    }

    pub fn sub_category(mut self, sub: impl Into<String>) -> Self {
        self.category.sub = Some(sub.into());
        self
    }

    pub fn sale(mut self, sale: i64) -> Self {
        self.sale = Some(sale);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn search_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.inventory.quantity = quantity;
        self
    }

    pub fn ratings(mut self, average: f64, count: u64) -> Self {
        self.ratings = Ratings { average, count };
        self
    }

    pub fn purchased(mut self, purchased: u64) -> Self {
        self.purchased = purchased;
        self
    }

    pub fn featured(mut self) -> Self {
        self.flags.featured = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.flags.active = false;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Validate and build the product.
    pub fn build(self) -> Result<Product, CatalogError> {
        for (field, value) in [
            ("id", self.id.as_str()),
            ("slug", self.slug.as_str()),
            ("sku", self.sku.as_str()),
            ("name", self.name.as_str()),
            ("category", self.category.main.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::validation(format!("{} must not be empty", field)));
            }
        }
        if !(0.0..=5.0).contains(&self.ratings.average) {
            return Err(CatalogError::validation(format!(
                "rating average must be within 0..=5, got {}",
                self.ratings.average
            )));
        }
        if self.inventory.quantity < 0 {
            return Err(CatalogError::validation("quantity must not be negative"));
        }

        let pricing = Pricing::new(self.regular, self.sale)?;

        Ok(Product {
            id: self.id,
            slug: self.slug,
            sku: self.sku,
            name: self.name,
            category: self.category,
            tags: self.tags,
            search_keywords: self.search_keywords,
            pricing,
            inventory: self.inventory,
            ratings: self.ratings,
            flags: self.flags,
            purchased: self.purchased,
            created_at: self.created_at,
            deleted_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gao_lut() -> ProductDraft {
        ProductDraft::new(
            "gao-lut-dien-bien",
            "gao-lut-dien-bien-huu-co",
            "GL-DB-001",
            "Gạo lứt Điện Biên hữu cơ",
            "Gạo lứt",
            55000,
        )
        .sale(49000)
        .tags(["organic", "whole-grain"])
    }

    #[test]
    fn test_build_valid_product() {
        let product = gao_lut().quantity(12).build().unwrap();
        assert!(product.is_listed());
        assert_eq!(product.inventory.quantity, 12);
        assert!((product.discount_percentage() - 10.909).abs() < 0.01);
        assert!(product.check_integrity().is_ok());
    }

    #[test]
    fn test_build_rejects_empty_fields() {
        let err = ProductDraft::new("p1", " ", "SKU", "Name", "Gạo lứt", 1000)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("slug"));
    }

    #[test]
    fn test_build_rejects_bad_values() {
        assert!(gao_lut().ratings(5.5, 3).build().is_err());
        assert!(gao_lut().quantity(-1).build().is_err());
        assert!(ProductDraft::new("p1", "s", "SKU", "Name", "Trà", 0).build().is_err());
    }

    #[test]
    fn test_inactive_or_deleted_not_listed() {
        assert!(!gao_lut().inactive().build().unwrap().is_listed());

        let mut product = gao_lut().build().unwrap();
        product.deleted_at = Some(Utc::now());
        assert!(!product.is_listed());
    }

    #[test]
    fn test_integrity_check_on_stored_record() {
        let mut product = gao_lut().build().unwrap();
        product.pricing.regular = 0;
        let err = product.check_integrity().unwrap_err();
        assert!(matches!(err, CatalogError::DataIntegrity { .. }));
    }
}
