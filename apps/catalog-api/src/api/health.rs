//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;
use serde_json::Value;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async { check_health(&state.mongo_client).await.into_result() }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
