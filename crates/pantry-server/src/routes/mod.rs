pub mod commands;
pub mod health;
pub mod likes;

use axum::Router;

use pantry_core::RecipeSource;

use crate::state::AppState;

pub fn create_router<S: RecipeSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .merge(commands::routes::<S>())
        .merge(likes::routes::<S>())
        .merge(health::routes::<S>())
        .with_state(state)
}
