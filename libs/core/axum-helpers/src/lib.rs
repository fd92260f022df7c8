//! # Axum Helpers
//!
//! Utilities for building the catalog's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security-header middleware
//! - **[`errors`]**: `AppError` and the `{error}` response body
//! - **[`extractors`]**: JSON body and query extractors that reject with `AppError`

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, security_headers};

pub use errors::{AppError, ErrorResponse};

pub use extractors::{JsonBody, QueryParams};
