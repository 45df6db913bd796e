//! The search service: planner, assembler and cache wired together.

use std::collections::BTreeSet;
use std::sync::Arc;

use thucduong_cache::{CacheKey, CacheKeyBuilder, CacheTtlConfig, ResultCache, TtlClass};
use thucduong_data::{guarded, DependencyTag};
use thucduong_observability::{operation_span, RequestId};
use tracing::{debug, error, Instrument};

use crate::config::SearchConfig;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::search::{
    admit, Assembler, Clause, EnrichedProduct, FilterPlanner, FilterRequest, Predicate, ResultPage,
    SearchPlan, SortSpec,
};
use crate::store::{CatalogStore, ReviewAggregator};

/// Read-side entry point of the catalog.
///
/// Cheap to clone; clones share the stores and the cache.
#[derive(Debug, Clone)]
pub struct SearchService {
    planner: FilterPlanner,
    assembler: Assembler,
    cache: ResultCache,
    ttls: CacheTtlConfig,
}

impl SearchService {
    pub fn new(
        config: &SearchConfig,
        catalog: Arc<dyn CatalogStore>,
        reviews: Arc<dyn ReviewAggregator>,
        cache: ResultCache,
    ) -> Self {
        Self {
            planner: FilterPlanner::new(config.default_page_size),
            assembler: Assembler::new(catalog, reviews, config.timeouts.clone()),
            cache,
            ttls: config.cache.clone(),
        }
    }

    /// Plan, look up, and on a miss assemble and cache a result page.
    ///
    /// Invalid requests fail before any store or cache access. Failed
    /// assemblies are never cached.
    pub async fn search_products(&self, request: &FilterRequest) -> Result<ResultPage, CatalogError> {
        let span = operation_span(&RequestId::generate(), "search_products");
        self.search_products_in_span(request).instrument(span).await
    }

    /// A listed product by slug, with its computed fields.
    ///
    /// Returns `None` for unknown, inactive or deleted products.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<EnrichedProduct>, CatalogError> {
        let span = operation_span(&RequestId::generate(), "product_by_slug");
        self.product_by_slug_in_span(slug).instrument(span).await
    }

    /// Up to `limit` listed products in the same main category as `id`,
    /// priced within 30% of it, best rated first.
    ///
    /// An unknown or unlisted source yields no suggestions.
    pub async fn similar_products(
        &self,
        id: &ProductId,
        limit: i64,
    ) -> Result<Vec<EnrichedProduct>, CatalogError> {
        let span = operation_span(&RequestId::generate(), "similar_products");
        self.similar_products_in_span(id, limit).instrument(span).await
    }

    /// Listed products flagged as featured, newest first.
    pub async fn featured_products(&self) -> Result<Vec<EnrichedProduct>, CatalogError> {
        let span = operation_span(&RequestId::generate(), "featured_products");
        self.featured_products_in_span().instrument(span).await
    }

    /// Distinct main categories of listed products, sorted.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let span = operation_span(&RequestId::generate(), "categories");
        self.categories_in_span().instrument(span).await
    }

    async fn search_products_in_span(&self, request: &FilterRequest) -> Result<ResultPage, CatalogError> {
        let plan = self.planner.plan(request)?;
        let key = plan.cache_key();

        if let Some(page) = self.cache.lookup::<ResultPage>(&key).await {
            return Ok(page);
        }

        let page = self.assemble(&plan).await?;
        self.cache
            .store(&key, &page, self.ttls.ttl(plan.ttl_class()))
            .await;
        Ok(page)
    }

    async fn product_by_slug_in_span(&self, slug: &str) -> Result<Option<EnrichedProduct>, CatalogError> {
        let key = CacheKeyBuilder::new(TtlClass::ProductDetail.namespace())
            .text("slug", Some(slug))
            .build();
        if let Some(product) = self.cache.lookup::<EnrichedProduct>(&key).await {
            return Ok(Some(product));
        }

        let found = self
            .catalog_call(self.assembler.catalog().find_by_slug(slug))
            .await?;
        let Some(product) = found.filter(|product| product.is_listed()) else {
            debug!(slug, "no listed product for slug");
            return Ok(None);
        };
        admit(&product)?;

        let mut enriched = self.assembler.enrich(vec![product]).await.map_err(log_failure)?;
        let Some(product) = enriched.pop() else {
            return Ok(None);
        };
        self.cache
            .store(&key, &product, self.ttls.ttl(TtlClass::ProductDetail))
            .await;
        Ok(Some(product))
    }

    async fn similar_products_in_span(
        &self,
        id: &ProductId,
        limit: i64,
    ) -> Result<Vec<EnrichedProduct>, CatalogError> {
        if limit < 1 {
            return Err(CatalogError::validation(format!(
                "limit must be at least 1, got {}",
                limit
            )));
        }

        let found = self.catalog_call(self.assembler.catalog().find_by_id(id)).await?;
        let Some(source) = found.filter(|product| product.is_listed()) else {
            return Ok(Vec::new());
        };
        admit(&source)?;

        let plan = SearchPlan::similar_to(&source, limit);
        Ok(self.assemble(&plan).await?.items)
    }

    async fn featured_products_in_span(&self) -> Result<Vec<EnrichedProduct>, CatalogError> {
        let key = CacheKey::new(format!("{}:featured", TtlClass::ProductList.namespace()));
        if let Some(products) = self.cache.lookup::<Vec<EnrichedProduct>>(&key).await {
            return Ok(products);
        }

        let featured = Predicate::listed().and(Clause::Featured);
        let products = self
            .assembler
            .matching(&featured, SortSpec::default())
            .await
            .map_err(log_failure)?;
        let products = self.assembler.enrich(products).await.map_err(log_failure)?;

        self.cache
            .store(&key, &products, self.ttls.ttl(TtlClass::ProductList))
            .await;
        Ok(products)
    }

    async fn categories_in_span(&self) -> Result<Vec<String>, CatalogError> {
        let key = CacheKey::new(format!("{}:all", TtlClass::CategoryList.namespace()));
        if let Some(categories) = self.cache.lookup::<Vec<String>>(&key).await {
            return Ok(categories);
        }

        let products = self
            .assembler
            .matching(&Predicate::listed(), SortSpec::default())
            .await
            .map_err(log_failure)?;
        let categories: Vec<String> = products
            .into_iter()
            .map(|product| product.category.main)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        self.cache
            .store(&key, &categories, self.ttls.ttl(TtlClass::CategoryList))
            .await;
        Ok(categories)
    }

    async fn assemble(&self, plan: &SearchPlan) -> Result<ResultPage, CatalogError> {
        self.assembler.assemble(plan).await.map_err(log_failure)
    }

    async fn catalog_call<T, F>(&self, call: F) -> Result<T, CatalogError>
    where
        F: std::future::Future<Output = Result<T, thucduong_data::StoreError>>,
    {
        let limit = self.assembler.timeouts().for_tag(DependencyTag::Catalog);
        guarded(DependencyTag::Catalog, limit, call)
            .await
            .map_err(|e| log_failure(e.into()))
    }
}

fn log_failure(err: CatalogError) -> CatalogError {
    if let CatalogError::DependencyUnavailable(e) = &err {
        error!(dependency = %e.dependency(), error = %e, "dependency failed");
    }
    err
}
