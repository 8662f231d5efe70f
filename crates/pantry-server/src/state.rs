use std::sync::Arc;

use pantry_client::HttpRecipeSource;
use pantry_core::{Controller, RecipeSource};

/// Application state shared across handlers.
pub struct AppState<S: RecipeSource = HttpRecipeSource> {
    pub controller: Arc<Controller<S>>,
}

impl<S: RecipeSource> AppState<S> {
    pub fn new(controller: Controller<S>) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}

impl<S: RecipeSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}
