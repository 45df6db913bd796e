//! Filter planning: request validation and query construction.

use std::collections::BTreeSet;

use thucduong_cache::{CacheKey, CacheKeyBuilder, TtlClass};

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::predicate::{Clause, Predicate};
use crate::search::request::{FilterRequest, SortDirection, SortField, SortSpec};

/// Items per page when the request does not say.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Requested page of the match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Page number, 1-indexed.
    pub page: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Number of matches skipped before this page.
    pub fn offset(&self) -> usize {
        let offset = (self.page - 1).saturating_mul(self.limit);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    pub fn limit(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

/// The filters of a request after trimming and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFilters {
    pub query: Option<String>,
    pub category: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub tags: BTreeSet<String>,
}

/// Everything needed to evaluate one listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub filters: NormalizedFilters,
    pub predicate: Predicate,
    pub sort: SortSpec,
    pub window: PageWindow,
}

impl SearchPlan {
    /// Plan for products similar to `source`: same main category, regular
    /// price within 30% either way, best rated first.
    ///
    /// Bounds are computed in `i128` and saturate at `i64::MAX`.
    pub fn similar_to(source: &Product, limit: i64) -> Self {
        let price = i128::from(source.pricing.regular);
        let filters = NormalizedFilters {
            category: Some(source.category.main.clone()),
            price_min: Some(saturate((price * 7 + 9) / 10)),
            price_max: Some(saturate(price * 13 / 10)),
            ..Default::default()
        };
        let predicate = build_predicate(&filters).and(Clause::Exclude(source.id.clone()));

        Self {
            filters,
            predicate,
            sort: SortSpec::new(SortField::RatingAverage, SortDirection::Desc),
            window: PageWindow { page: 1, limit },
        }
    }

    /// TTL class of the cached result: free-text searches age faster than listings.
    pub fn ttl_class(&self) -> TtlClass {
        if self.filters.query.is_some() {
            TtlClass::Search
        } else {
            TtlClass::ProductList
        }
    }

    /// Cache key built from the normalized request, with defaults resolved.
    pub fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.ttl_class().namespace())
            .text("q", self.filters.query.as_deref())
            .text("category", self.filters.category.as_deref())
            .number("price_min", self.filters.price_min)
            .number("price_max", self.filters.price_max)
            .set("tags", self.filters.tags.iter().cloned())
            .text("sort", Some(self.sort.key().as_str()))
            .number("page", Some(self.window.page))
            .number("limit", Some(self.window.limit))
            .build()
    }
}

/// Turns filter requests into search plans.
#[derive(Debug, Clone)]
pub struct FilterPlanner {
    default_page_size: i64,
}

impl FilterPlanner {
    pub fn new(default_page_size: i64) -> Self {
        Self { default_page_size }
    }

    /// Validate a request and build its plan.
    ///
    /// Absent page/limit take defaults; present but non-positive values are
    /// rejected, as are negative prices and an inverted price range.
    pub fn plan(&self, request: &FilterRequest) -> Result<SearchPlan, CatalogError> {
        let page = positive_or("page", request.page, 1)?;
        let limit = positive_or("limit", request.limit, self.default_page_size)?;

        for (name, value) in [("price_min", request.price_min), ("price_max", request.price_max)] {
            if let Some(value) = value {
                if value < 0 {
                    return Err(CatalogError::validation(format!(
                        "{} must not be negative, got {}",
                        name, value
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (request.price_min, request.price_max) {
            if max < min {
                return Err(CatalogError::validation(format!(
                    "price_max ({}) is below price_min ({})",
                    max, min
                )));
            }
        }

        let filters = NormalizedFilters {
            query: non_blank(request.query.as_deref()),
            category: non_blank(request.category.as_deref()),
            price_min: request.price_min,
            price_max: request.price_max,
            tags: request
                .tags
                .iter()
                .flatten()
                .filter_map(|tag| non_blank(Some(tag.as_str())))
                .collect(),
        };

        Ok(SearchPlan {
            predicate: build_predicate(&filters),
            filters,
            sort: request.sort.unwrap_or_default(),
            window: PageWindow { page, limit },
        })
    }
}

impl Default for FilterPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

fn build_predicate(filters: &NormalizedFilters) -> Predicate {
    let mut predicate = Predicate::listed();
    if let Some(query) = &filters.query {
        predicate = predicate.and(Clause::Text(query.clone()));
    }
    if let Some(category) = &filters.category {
        predicate = predicate.and(Clause::Category(category.clone()));
    }
    if let Some(min) = filters.price_min {
        predicate = predicate.and(Clause::RegularPriceAtLeast(min));
    }
    if let Some(max) = filters.price_max {
        predicate = predicate.and(Clause::RegularPriceAtMost(max));
    }
    if !filters.tags.is_empty() {
        predicate = predicate.and(Clause::TagsAny(filters.tags.clone()));
    }
    predicate
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn positive_or(name: &str, value: Option<i64>, default: i64) -> Result<i64, CatalogError> {
    match value {
        None => Ok(default),
        Some(v) if v >= 1 => Ok(v),
        Some(v) => Err(CatalogError::validation(format!(
            "{} must be at least 1, got {}",
            name, v
        ))),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
