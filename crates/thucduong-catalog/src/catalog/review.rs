//! Reviews and their per-product statistics.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ids::{ProductId, ReviewId};

/// Moderation state of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl Review {
    /// Create a validated review.
    pub fn new(
        id: impl Into<ReviewId>,
        product_id: impl Into<ProductId>,
        rating: u8,
        status: ReviewStatus,
    ) -> Result<Self, CatalogError> {
        if !(1..=5).contains(&rating) {
            return Err(CatalogError::validation(format!(
                "rating must be within 1..=5, got {}",
                rating
            )));
        }
        Ok(Self {
            id: id.into(),
            product_id: product_id.into(),
            rating,
            status,
        })
    }

    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }
}

/// Average rating and count of approved reviews for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub average: f64,
    pub count: u64,
}

impl ReviewStats {
    /// Aggregate the approved reviews among `reviews`.
    ///
    /// Returns `None` when none are approved.
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Option<Self> {
        let (sum, count) = reviews
            .into_iter()
            .filter(|review| review.is_approved())
            .fold((0u64, 0u64), |(sum, count), review| {
                (sum + u64::from(review.rating), count + 1)
            });

        (count > 0).then(|| Self {
            average: sum as f64 / count as f64,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: &str, rating: u8, status: ReviewStatus) -> Review {
        Review::new(id, "p1", rating, status).unwrap()
    }

    #[test]
    fn test_only_approved_reviews_count() {
        let reviews = vec![
            review("r1", 5, ReviewStatus::Approved),
            review("r2", 4, ReviewStatus::Approved),
            review("r3", 1, ReviewStatus::Pending),
            review("r4", 1, ReviewStatus::Rejected),
        ];
        let stats = ReviewStats::from_reviews(&reviews).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, 4.5);
    }

    #[test]
    fn test_no_approved_reviews_is_none() {
        let reviews = vec![review("r1", 5, ReviewStatus::Pending)];
        assert_eq!(ReviewStats::from_reviews(&reviews), None);
        assert_eq!(ReviewStats::from_reviews(&[]), None);
    }

    #[test]
    fn test_rating_out_of_range() {
        assert!(Review::new("r1", "p1", 0, ReviewStatus::Approved).is_err());
        assert!(Review::new("r1", "p1", 6, ReviewStatus::Approved).is_err());
    }
}
