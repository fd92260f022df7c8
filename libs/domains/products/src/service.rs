//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{
    CategorizedProducts, CreateProduct, ListingQuery, Product, ProductPage, RankingMetric,
    SUMMARY_SIZE, total_pages,
};
use crate::repository::ProductRepository;

/// Product service providing the catalog operations
///
/// Listing, creation and the categorized summary, each orchestrating one or
/// more repository calls.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product with zeroed counters and the current timestamp
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = self.repository.insert(Product::new(input)).await?;
        tracing::info!(product_id = %product.id, "Product added: {}", product.name);
        Ok(product)
    }

    /// One page of filtered, sorted products plus the total page count
    ///
    /// The count and the page are read separately, so a concurrent insert
    /// may make them disagree by one.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ListingQuery) -> ProductResult<ProductPage> {
        let count = self.repository.count(query.filter).await?;
        let total_pages = total_pages(count, query.limit);

        if query.skip() >= count {
            tracing::info!("Page {} is past the last page {}", query.page, total_pages);
            return Ok(ProductPage {
                products: Vec::new(),
                total_pages,
            });
        }

        let products = self.repository.find_page(query).await?;

        tracing::info!(
            "Fetched {} products for page {}",
            products.len(),
            query.page
        );

        Ok(ProductPage {
            products,
            total_pages,
        })
    }

    /// Top products by views and by reviews
    ///
    /// `most_popular` is ranked by reviews, the same as `most_reviewed`.
    #[instrument(skip(self))]
    pub async fn categorized(&self) -> ProductResult<CategorizedProducts> {
        let (most_viewed, most_popular, most_reviewed) = tokio::try_join!(
            self.repository.top_by(RankingMetric::Views, SUMMARY_SIZE),
            self.repository.top_by(RankingMetric::Reviews, SUMMARY_SIZE),
            self.repository.top_by(RankingMetric::Reviews, SUMMARY_SIZE),
        )?;

        tracing::info!(
            most_viewed = most_viewed.len(),
            most_popular = most_popular.len(),
            most_reviewed = most_reviewed.len(),
            "Fetched categorized products"
        );

        Ok(CategorizedProducts {
            most_viewed,
            most_popular,
            most_reviewed,
        })
    }
}
