use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use pantry_core::{Command, RecipeSource, RecordingView, ViewUpdate};

use crate::state::AppState;

pub fn routes<S: RecipeSource + 'static>() -> Router<AppState<S>> {
    Router::new().route("/api/commands", post(post_command::<S>))
}

#[derive(Serialize)]
struct CommandResponse {
    updates: Vec<ViewUpdate>,
}

/// POST /api/commands - Run one view command and return the render instructions it produced.
async fn post_command<S: RecipeSource + 'static>(
    State(state): State<AppState<S>>,
    Json(command): Json<Command>,
) -> Json<CommandResponse> {
    let view = RecordingView::new();
    state.controller.dispatch(command, &view).await;

    let updates = view.take();
    tracing::debug!("Command produced {} view updates", updates.len());
    Json(CommandResponse { updates })
}
