//! Readiness endpoint; liveness (`/health`) comes from `axum_helpers::health_router`

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// `200 {"status":"ready","mongodb":"connected"}` or `503` when the store is unreachable
async fn ready(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async {
            database::mongodb::ping(&state.mongo_client)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
