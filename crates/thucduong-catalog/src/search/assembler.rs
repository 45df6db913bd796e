//! Result assembly: one store evaluation turned into a page, a total and facets.

use std::sync::Arc;

use futures::future::try_join_all;
use thucduong_data::{guarded, DependencyTag, TimeoutConfig};
use tracing::{debug, warn};

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::planner::SearchPlan;
use crate::search::predicate::Predicate;
use crate::search::request::SortSpec;
use crate::search::results::{AvailableFilters, EnrichedProduct, Pagination, ResultPage};
use crate::store::{CatalogStore, ReviewAggregator};

/// Evaluates search plans against the stores.
#[derive(Clone)]
pub struct Assembler {
    catalog: Arc<dyn CatalogStore>,
    reviews: Arc<dyn ReviewAggregator>,
    timeouts: TimeoutConfig,
}

impl Assembler {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        reviews: Arc<dyn ReviewAggregator>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            catalog,
            reviews,
            timeouts,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// Evaluate a plan.
    ///
    /// The page, the total and the available filters all come from the same
    /// match set. Products failing their integrity check are left out of all
    /// three.
    pub async fn assemble(&self, plan: &SearchPlan) -> Result<ResultPage, CatalogError> {
        let matched = self.matching(&plan.predicate, plan.sort).await?;

        let total = matched.len() as u64;
        let available_filters = AvailableFilters::from_products(&matched);

        let page: Vec<Product> = matched
            .into_iter()
            .skip(plan.window.offset())
            .take(plan.window.limit())
            .collect();
        let items = self.enrich(page).await?;

        debug!(
            total,
            returned = items.len(),
            page = plan.window.page,
            sort = %plan.sort.key(),
            "assembled result page"
        );

        Ok(ResultPage {
            items,
            metadata: Pagination::new(plan.window, total),
            available_filters,
        })
    }

    /// Products matching `predicate` in `sort` order, less any that fail
    /// their integrity check.
    pub async fn matching(
        &self,
        predicate: &Predicate,
        sort: SortSpec,
    ) -> Result<Vec<Product>, CatalogError> {
        let matched = guarded(
            DependencyTag::Catalog,
            self.timeouts.for_tag(DependencyTag::Catalog),
            self.catalog.find_matching(predicate),
        )
        .await?;

        let mut matched: Vec<Product> = matched
            .into_iter()
            .filter(|product| admit(product).is_ok())
            .collect();
        matched.sort_by(|a, b| sort.compare(a, b));
        Ok(matched)
    }

    /// Attach computed fields to products, keeping their order.
    ///
    /// Review statistics are fetched concurrently; any failure fails the whole
    /// batch.
    pub async fn enrich(&self, products: Vec<Product>) -> Result<Vec<EnrichedProduct>, CatalogError> {
        let limit = self.timeouts.for_tag(DependencyTag::Reviews);
        let stats = try_join_all(products.iter().map(|product| {
            guarded(
                DependencyTag::Reviews,
                limit,
                self.reviews.review_stats(&product.id),
            )
        }))
        .await?;

        Ok(products
            .into_iter()
            .zip(stats)
            .map(|(product, stats)| EnrichedProduct::new(product, stats))
            .collect())
    }
}

/// Integrity gate for a stored product. Failures are logged here so every
/// read path reports corrupt records the same way.
pub(crate) fn admit(product: &Product) -> Result<(), CatalogError> {
    product.check_integrity().inspect_err(|e| {
        warn!(product_id = %product.id, error = %e, "excluding product from results");
    })
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}
