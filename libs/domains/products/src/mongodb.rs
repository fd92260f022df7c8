//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::{FindOptions, IndexOptions},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListingQuery, Product, ProductCategory, ProductFilter, RankingMetric};
use crate::repository::ProductRepository;

/// Default collection name
pub const PRODUCTS_COLLECTION: &str = "products";

/// Stored shape of a product.
///
/// `_id` is a BSON UUID and `createdAt` a BSON datetime so that the store
/// orders both natively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: bson::Uuid,
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub reviews: i64,
    pub created_at: bson::DateTime,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: bson::Uuid::from_bytes(product.id.into_bytes()),
            name: product.name.clone(),
            price: product.price,
            category: product.category,
            views: product.views,
            reviews: product.reviews,
            created_at: bson::DateTime::from_millis(product.created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(document: ProductDocument) -> ProductResult<Self> {
        let millis = document.created_at.timestamp_millis();
        let created_at = chrono::DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            ProductError::Internal(format!("createdAt out of range: {}", millis))
        })?;

        Ok(Self {
            id: uuid::Uuid::from_bytes(document.id.bytes()),
            name: document.name,
            price: document.price,
            category: document.category,
            views: document.views,
            reviews: document.reviews,
            created_at,
        })
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the indexes backing listing sorts, filters and rankings
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = [
            ("idx_created_at", doc! { "createdAt": -1 }),
            ("idx_price", doc! { "price": 1 }),
            ("idx_category", doc! { "category": 1 }),
            ("idx_views", doc! { "views": -1, "createdAt": -1 }),
            ("idx_reviews", doc! { "reviews": -1, "createdAt": -1 }),
        ]
        .into_iter()
        .map(|(name, keys)| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        })
        .collect::<Vec<_>>();

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<ProductDocument> {
        &self.collection
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(category) = filter.category {
            doc.insert("category", category.to_string());
        }

        if let Some(max) = filter.max_price {
            doc.insert("price", doc! { "$lte": max });
        }

        doc
    }

    async fn collect(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.collection
            .insert_one(ProductDocument::from(&product))
            .await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_page(&self, query: ListingQuery) -> ProductResult<Vec<Product>> {
        let direction = query.sort.direction();
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": direction, "_id": direction })
            .skip(query.skip().min(i64::MAX as u64))
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .build();

        self.collect(Self::build_filter(&query.filter), options)
            .await
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn top_by(&self, metric: RankingMetric, limit: u64) -> ProductResult<Vec<Product>> {
        let mut sort = doc! {};
        sort.insert(metric.field(), -1);
        sort.insert("createdAt", -1);
        sort.insert("_id", -1);

        let options = FindOptions::builder()
            .sort(sort)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        self.collect(doc! {}, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProduct, ProductCategory};

    #[test]
    fn test_build_filter_empty() {
        let filter = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_filter_category_and_price() {
        let filter = MongoProductRepository::build_filter(&ProductFilter {
            category: Some(ProductCategory::MostReviewed),
            max_price: Some(25.5),
        });

        assert_eq!(
            filter,
            doc! { "category": "most_reviewed", "price": { "$lte": 25.5 } }
        );
    }

    #[test]
    fn test_document_round_trip_keeps_product() {
        let mut product = Product::new(CreateProduct {
            name: "Lamp".to_string(),
            price: 12.75,
            category: ProductCategory::MostPopular,
        });
        product.views = 4;
        product.reviews = 2;

        let document = ProductDocument::from(&product);
        let stored = bson::to_document(&document).unwrap();
        assert_eq!(stored.get_str("category").unwrap(), "most_popular");
        assert!(stored.get_datetime("createdAt").is_ok());

        let restored: ProductDocument = bson::from_document(stored).unwrap();
        assert_eq!(Product::try_from(restored).unwrap(), product);
    }
}
