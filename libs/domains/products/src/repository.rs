use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{ListingQuery, Product, ProductFilter, RankingMetric, SortOrder};

/// Repository trait for Product persistence
///
/// Orderings are total: ties on `createdAt` are broken by id, ties on a
/// ranking metric by `createdAt` descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a fully built product
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Products matching `query.filter`, ordered by `createdAt` in
    /// `query.sort` direction, windowed by `query.page` and `query.limit`
    async fn find_page(&self, query: ListingQuery) -> ProductResult<Vec<Product>>;

    /// Count products matching a filter
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64>;

    /// The `limit` products with the highest `metric`
    async fn top_by(&self, metric: RankingMetric, limit: u64) -> ProductResult<Vec<Product>>;
}

/// In-memory repository for tests and local runs without MongoDB
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing products, counters included
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

fn by_creation(a: &Product, b: &Product) -> Ordering {
    a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.products.write().await.push(product.clone());
        tracing::debug!(product_id = %product.id, "Stored product");
        Ok(product)
    }

    async fn find_page(&self, query: ListingQuery) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .iter()
            .filter(|p| query.filter.matches(p))
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Asc => result.sort_by(by_creation),
            SortOrder::Desc => result.sort_by(|a, b| by_creation(b, a)),
        }

        Ok(result
            .into_iter()
            .skip(usize::try_from(query.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn top_by(&self, metric: RankingMetric, limit: u64) -> ProductResult<Vec<Product>> {
        let mut result = self.products.read().await.clone();

        result.sort_by(|a, b| {
            metric
                .value(b)
                .cmp(&metric.value(a))
                .then_with(|| by_creation(b, a))
        });
        result.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(result)
    }
}
