//! HTTP client for the catalog API, used by the storefront views.

use async_trait::async_trait;
use axum_helpers::ErrorResponse;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CategorizedProducts, CreateProduct, ListingQuery, Product, ProductPage};
use crate::query::ListingParams;

/// Default catalog API location
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Operations the storefront needs from the catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self, query: ListingQuery) -> Result<ProductPage, ClientError>;

    /// `POST /products`
    async fn create_product(&self, input: CreateProduct) -> Result<Product, ClientError>;

    /// `GET /products/categorized`
    async fn categorized(&self) -> Result<CategorizedProducts, ClientError>;
}

/// `reqwest`-backed [`CatalogApi`]
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    base_url: String,
    client: Client,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Use a preconfigured client (timeouts, proxies)
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        warn!(status = %status, error = %message, "Catalog API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Default for HttpCatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self, query: ListingQuery) -> Result<ProductPage, ClientError> {
        debug!(?query, "Listing products");
        let response = self
            .client
            .get(self.url("/products"))
            .query(&ListingParams::from(&query))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_product(&self, input: CreateProduct) -> Result<Product, ClientError> {
        debug!(name = %input.name, "Creating product");
        let response = self
            .client
            .post(self.url("/products"))
            .json(&input)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn categorized(&self) -> Result<CategorizedProducts, ClientError> {
        let response = self
            .client
            .get(self.url("/products/categorized"))
            .send()
            .await?;
        Self::decode(response).await
    }
}
