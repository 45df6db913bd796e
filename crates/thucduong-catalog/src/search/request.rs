//! Filter requests and sort options.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Field a listing can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    RegularPrice,
    RatingAverage,
    /// Units sold.
    Popularity,
    Name,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::RegularPrice => "regular_price",
            SortField::RatingAverage => "rating_average",
            SortField::Popularity => "popularity",
            SortField::Name => "name",
        }
    }

    /// Document path of the field in the product collection.
    pub fn path(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::RegularPrice => "pricing.regular",
            SortField::RatingAverage => "ratings.average",
            SortField::Popularity => "analytics.purchased",
            SortField::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification; defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a storefront sort alias (`price_asc`, `price_desc`, `rating`,
    /// `popularity`, `newest`).
    pub fn from_alias(alias: &str) -> Option<Self> {
        let spec = match alias {
            "price_asc" => Self::new(SortField::RegularPrice, SortDirection::Asc),
            "price_desc" => Self::new(SortField::RegularPrice, SortDirection::Desc),
            "rating" => Self::new(SortField::RatingAverage, SortDirection::Desc),
            "popularity" => Self::new(SortField::Popularity, SortDirection::Desc),
            "newest" => Self::default(),
            _ => return None,
        };
        Some(spec)
    }

    /// Compare two products under this sort.
    ///
    /// Ties are broken by ascending product id so the order is total.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let by_field = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::RegularPrice => a.pricing.regular.cmp(&b.pricing.regular),
            SortField::RatingAverage => a.ratings.average.total_cmp(&b.ratings.average),
            SortField::Popularity => a.purchased.cmp(&b.purchased),
            SortField::Name => a.name.cmp(&b.name),
        };
        let by_field = match self.direction {
            SortDirection::Asc => by_field,
            SortDirection::Desc => by_field.reverse(),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }

    /// Key fragment, e.g. `created_at:desc`.
    pub fn key(&self) -> String {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        format!("{}:{}", self.field.as_str(), direction)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::CreatedAt, SortDirection::Desc)
    }
}

/// A product listing request as received from the storefront.
///
/// Every field is optional; absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    /// Free-text query.
    pub query: Option<String>,
    /// Main category.
    pub category: Option<String>,
    /// Inclusive lower bound on the regular price.
    pub price_min: Option<i64>,
    /// Inclusive upper bound on the regular price.
    pub price_max: Option<i64>,
    /// Matches products carrying at least one of these tags.
    pub tags: Option<Vec<String>>,
    pub sort: Option<SortSpec>,
    /// Page number, 1-indexed.
    pub page: Option<i64>,
    /// Items per page.
    pub limit: Option<i64>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set page and limit.
    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}
