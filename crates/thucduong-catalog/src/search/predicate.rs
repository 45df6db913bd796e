//! Match predicates over products.

use std::collections::BTreeSet;

use crate::catalog::Product;
use crate::ids::ProductId;

/// One condition a product must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Active and not soft-deleted.
    Listed,
    /// Case-insensitive match on name, tags or search keywords.
    Text(String),
    /// Main category equals the value.
    Category(String),
    /// `pricing.regular >= value`.
    RegularPriceAtLeast(i64),
    /// `pricing.regular <= value`.
    RegularPriceAtMost(i64),
    /// Product tags intersect the set.
    TagsAny(BTreeSet<String>),
    /// Any product but this one.
    Exclude(ProductId),
    /// Flagged for the storefront's featured listing.
    Featured,
}

impl Clause {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Clause::Listed => product.is_listed(),
            Clause::Text(text) => {
                let needle = text.to_lowercase();
                std::iter::once(&product.name)
                    .chain(&product.tags)
                    .chain(&product.search_keywords)
                    .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
            Clause::Category(category) => product.category.main == *category,
            Clause::RegularPriceAtLeast(min) => product.pricing.regular >= *min,
            Clause::RegularPriceAtMost(max) => product.pricing.regular <= *max,
            Clause::TagsAny(tags) => product.tags.iter().any(|tag| tags.contains(tag)),
            Clause::Exclude(id) => product.id != *id,
            Clause::Featured => product.flags.featured,
        }
    }
}

/// Conjunction of clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Every listed product.
    pub fn listed() -> Self {
        Self {
            clauses: vec![Clause::Listed],
        }
    }

    /// Add a clause.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.clauses.iter().all(|clause| clause.matches(product))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;

    fn gao_lut() -> Product {
        ProductDraft::new("p1", "gao-lut", "GL-1", "Gạo lứt Điện Biên hữu cơ", "Gạo lứt", 55000)
            .sale(49000)
            .tags(["organic", "whole-grain"])
            .search_keywords(["brown rice"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_listed_only() {
        let product = gao_lut();
        assert!(Predicate::listed().matches(&product));

        let mut inactive = product.clone();
        inactive.flags.active = false;
        assert!(!Predicate::listed().matches(&inactive));
    }

    #[test]
    fn test_price_bounds_use_regular_price() {
        let product = gao_lut();
        assert!(Predicate::listed().and(Clause::RegularPriceAtMost(55000)).matches(&product));
        assert!(!Predicate::listed().and(Clause::RegularPriceAtMost(50000)).matches(&product));
        assert!(Predicate::listed().and(Clause::RegularPriceAtLeast(55000)).matches(&product));
    }

    #[test]
    fn test_tags_intersect() {
        let product = gao_lut();
        let any = |tags: &[&str]| Clause::TagsAny(tags.iter().map(|t| t.to_string()).collect());
        assert!(any(&["vegan", "organic"]).matches(&product));
        assert!(!any(&["vegan"]).matches(&product));
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let product = gao_lut();
        assert!(Clause::Text("ĐIỆN BIÊN".into()).matches(&product));
        assert!(Clause::Text("rice".into()).matches(&product));
        assert!(Clause::Text("whole".into()).matches(&product));
        assert!(!Clause::Text("trà".into()).matches(&product));
    }

    #[test]
    fn test_featured_requires_flag() {
        let featured = Predicate::listed().and(Clause::Featured);
        assert!(!featured.matches(&gao_lut()));

        let mut flagged = gao_lut();
        flagged.flags.featured = true;
        assert!(featured.matches(&flagged));

        flagged.flags.active = false;
        assert!(!featured.matches(&flagged));
    }
}
