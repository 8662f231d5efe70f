use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Minimal search-result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
}

impl RecipeSummary {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            image: image.into(),
        }
    }
}

/// Full recipe record as delivered by a source, before ingredient parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
    pub url: String,
    /// Free-text ingredient lines, in upstream order.
    pub ingredients: Vec<String>,
}

/// Read access to the remote recipe API.
pub trait RecipeSource: Send + Sync {
    /// Search recipes by query. Order of the returned summaries is the upstream order.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, SourceError>> + Send;

    /// Fetch one recipe by its external id.
    fn get_recipe(&self, id: &str) -> impl Future<Output = Result<RecipeData, SourceError>> + Send;
}

// In-memory source for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// Canned recipe source. Unknown queries return no results, unknown ids
    /// return `SourceError::NotFound`.
    #[derive(Default)]
    pub struct FakeRecipeSource {
        searches: RwLock<HashMap<String, Result<Vec<RecipeSummary>, SourceError>>>,
        recipes: RwLock<HashMap<String, RecipeData>>,
        search_calls: AtomicUsize,
        recipe_calls: AtomicUsize,
    }

    impl FakeRecipeSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_search(self, query: &str, results: Vec<RecipeSummary>) -> Self {
            self.searches
                .write()
                .unwrap()
                .insert(query.to_string(), Ok(results));
            self
        }

        pub fn with_search_error(self, query: &str, error: SourceError) -> Self {
            self.searches
                .write()
                .unwrap()
                .insert(query.to_string(), Err(error));
            self
        }

        pub fn with_recipe(self, recipe: RecipeData) -> Self {
            self.recipes
                .write()
                .unwrap()
                .insert(recipe.id.clone(), recipe);
            self
        }

        pub fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        pub fn recipe_calls(&self) -> usize {
            self.recipe_calls.load(Ordering::SeqCst)
        }
    }

    impl RecipeSource for FakeRecipeSource {
        async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, SourceError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.searches
                .read()
                .unwrap()
                .get(query)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get_recipe(&self, id: &str) -> Result<RecipeData, SourceError> {
            self.recipe_calls.fetch_add(1, Ordering::SeqCst);
            self.recipes
                .read()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| SourceError::NotFound(id.to_string()))
        }
    }

    /// Build a recipe record with generated title/author/image fields.
    pub fn recipe_data(id: &str, ingredients: &[&str]) -> RecipeData {
        RecipeData {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            author: "Test Kitchen".to_string(),
            image: format!("http://img.test/{}.jpg", id),
            url: format!("http://recipes.test/{}", id),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build `n` summaries with ids `"{prefix}-0"`, `"{prefix}-1"`, ...
    pub fn summaries(prefix: &str, n: usize) -> Vec<RecipeSummary> {
        (0..n)
            .map(|i| {
                RecipeSummary::new(
                    format!("{}-{}", prefix, i),
                    format!("{} {}", prefix, i),
                    "Test Kitchen",
                    format!("http://img.test/{}-{}.jpg", prefix, i),
                )
            })
            .collect()
    }
}
