//! Server infrastructure: router assembly, health endpoints, graceful shutdown.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use axum_helpers::http::cors_layer_from_env;
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, cors_layer_from_env()?)
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_JSON_PATH, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
