use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use pantry_core::RecipeSource;

use crate::state::AppState;

pub fn routes<S: RecipeSource + 'static>() -> Router<AppState<S>> {
    Router::new().route("/api/likes", get(get_likes::<S>))
}

/// GET /api/likes - Liked recipes in the order they were liked.
async fn get_likes<S: RecipeSource + 'static>(State(state): State<AppState<S>>) -> Response {
    match state.controller.likes().await {
        Ok(likes) => Json(likes).into_response(),
        Err(e) => {
            tracing::error!("Failed to read liked recipes: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", e),
            )
                .into_response()
        }
    }
}
