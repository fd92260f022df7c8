use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Combine API routes with documentation and cross-cutting middleware.
///
/// - Swagger UI at `/swagger-ui`, OpenAPI JSON at `/api-docs/openapi.json`
/// - API routes merged at the root (`/products`, ...)
/// - request tracing, security headers, CORS, response compression
/// - `404 {error}` fallback
///
/// Routes must already have their state applied.
pub fn create_router<T>(apis: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `shutdown_timeout`.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails while running.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     drop(mongo_client);
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let signal_listener = coordinator.clone();
    let mut cleanup_trigger = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server running on {}", listener.local_addr()?);

    tokio::spawn(async move {
        signal_listener.wait_for_signal().await;
    });

    let cleanup_handle = tokio::spawn(async move {
        if cleanup_trigger.recv().await.is_err() {
            return;
        }

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinator.clone().shutdown_requested())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // Make sure cleanup runs even when the server stopped on its own
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}
