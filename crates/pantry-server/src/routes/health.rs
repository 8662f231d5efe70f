use axum::{routing::get, Json, Router};
use serde::Serialize;

use pantry_core::RecipeSource;

use crate::state::AppState;

pub fn routes<S: RecipeSource + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn ready() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
