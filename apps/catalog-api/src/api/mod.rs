//! Routes served by the catalog API

pub mod health;

use axum::Router;
use domain_products::{ProductService, handlers};

use crate::state::AppState;

/// `/products` plus `/ready`
pub fn routes(state: &AppState) -> Router {
    let products = handlers::router(ProductService::new(state.products()));

    Router::new()
        .nest("/products", products)
        .merge(health::router(state.clone()))
}
