//! HTTP handlers for the catalog API

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    ErrorResponse, JsonBody, QueryParams,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CategorizedProducts, CreateProduct, ListingQuery, Product, ProductCategory, ProductPage,
    SortOrder,
};
use crate::query::ListingParams;
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the products routes, relative to their mount point
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, categorized_products),
    components(
        schemas(
            Product, CreateProduct, ProductPage, CategorizedProducts,
            ProductCategory, SortOrder, ErrorResponse
        ),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router, to be nested under `/products`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/categorized", get(categorized_products))
        .with_state(shared_service)
}

/// List products with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListingParams),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(params): QueryParams<ListingParams>,
) -> ProductResult<Json<ProductPage>> {
    let query = ListingQuery::try_from(params)?;
    let page = service.list_products(query).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<CreateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// Top two products by views and by reviews
#[utoipa::path(
    get,
    path = "/categorized",
    tag = "Products",
    responses(
        (status = 200, description = "Ranked product lists", body = CategorizedProducts),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn categorized_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<CategorizedProducts>> {
    let summary = service.categorized().await?;
    Ok(Json(summary))
}
