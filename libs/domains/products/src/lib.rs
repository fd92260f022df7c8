//! Products Domain
//!
//! The product catalog: a MongoDB-backed store, the listing, creation and
//! categorized-summary operations, their HTTP handlers, and a typed HTTP
//! client for consumers of the API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐
//! │  Handlers   │   │   Client    │  ← HTTP endpoints / HTTP consumer
//! └──────┬──────┘   └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Pagination maths, rankings, logging
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, query types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, mongodb::MongoProductRepository, service::ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository);
//!
//! let router = axum::Router::new().nest("/products", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use client::{CatalogApi, ClientError, HttpCatalogClient};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CategorizedProducts, CreateProduct, ListingQuery, Product, ProductCategory, ProductFilter,
    ProductPage, RankingMetric, SortOrder,
};
pub use self::mongodb::MongoProductRepository;
pub use query::ListingParams;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
