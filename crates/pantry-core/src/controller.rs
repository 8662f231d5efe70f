use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::command::{recipe_id_from_hash, Command};
use crate::error::{CoreError, StorageError};
use crate::generation::RequestGeneration;
use crate::likes::{Like, Likes};
use crate::list::ShoppingList;
use crate::recipe::{Recipe, ServingsDirection};
use crate::search::Search;
use crate::source::RecipeSource;
use crate::storage::LikeStore;
use crate::view::{
    render_like_menu, render_results, render_servings, LoaderTarget, View, ViewUpdate,
    DEFAULT_RESULTS_PER_PAGE,
};

pub const SEARCH_ERROR_MESSAGE: &str = "Something went wrong with the search. Please try again.";
pub const RECIPE_ERROR_MESSAGE: &str = "Error processing recipe!";
pub const LIKES_ERROR_MESSAGE: &str = "Could not save your liked recipes.";
pub const LIKES_LOAD_ERROR_MESSAGE: &str = "Could not load your liked recipes.";

/// Everything the controller knows about the session. Each part is created on
/// first use.
#[derive(Default)]
pub struct ApplicationState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: Option<ShoppingList>,
    pub likes: Option<Likes>,
}

/// Turns commands into state changes and render instructions.
///
/// The state lock is never held across a fetch. Search and recipe loads are
/// tagged with a request generation; a response that is no longer the latest
/// for its flow is dropped instead of replacing newer state.
pub struct Controller<S: RecipeSource> {
    source: Arc<S>,
    like_store: Arc<dyn LikeStore>,
    state: Mutex<ApplicationState>,
    search_generation: RequestGeneration,
    recipe_generation: RequestGeneration,
    results_per_page: usize,
}

impl<S: RecipeSource> Controller<S> {
    pub fn new(source: Arc<S>, like_store: Arc<dyn LikeStore>) -> Self {
        Self {
            source,
            like_store,
            state: Mutex::new(ApplicationState::default()),
            search_generation: RequestGeneration::new(),
            recipe_generation: RequestGeneration::new(),
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
        }
    }

    pub fn with_results_per_page(mut self, results_per_page: usize) -> Self {
        self.results_per_page = results_per_page.max(1);
        self
    }

    /// Run one command, sending its render instructions to `view`.
    pub async fn dispatch<V: View>(&self, command: Command, view: &V) {
        tracing::debug!("Dispatching {:?}", command);
        match command {
            Command::Load { hash } => {
                self.restore_likes(view).await;
                self.control_recipe(&hash, view).await;
            }
            Command::SubmitSearch { query } => self.control_search(&query, view).await,
            Command::GoToPage { page } => self.go_to_page(page, view).await,
            Command::Navigate { hash } => self.control_recipe(&hash, view).await,
            Command::UpdateServings { direction } => self.update_servings(direction, view).await,
            Command::AddToList => self.control_list(view).await,
            Command::ToggleLike => self.control_like(view).await,
            Command::DeleteItem { id } => self.delete_item(id, view).await,
            Command::UpdateItemCount { id, count } => self.update_item_count(id, count).await,
        }
    }

    /// Read-only access to the current state.
    pub async fn inspect<R>(&self, f: impl FnOnce(&ApplicationState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Liked recipes, restoring them from storage if needed.
    pub async fn likes(&self) -> Result<Vec<Like>, StorageError> {
        let mut state = self.state.lock().await;
        Ok(self.likes_mut(&mut state)?.likes().to_vec())
    }

    async fn control_search<V: View>(&self, query: &str, view: &V) {
        let mut search = match Search::new(query) {
            Ok(search) => search,
            Err(_) => {
                tracing::debug!("Ignoring empty search query");
                return;
            }
        };

        let generation = self.search_generation.next();
        let pending = vec![
            ViewUpdate::ClearInput,
            ViewUpdate::ClearResults,
            ViewUpdate::RenderLoader {
                target: LoaderTarget::SearchResults,
            },
        ];

        tracing::info!("Searching for {:?} ({})", search.query, generation);
        let fetched = search.get_results(self.source.as_ref()).await;

        let mut state = self.state.lock().await;
        if !self.search_generation.is_current(generation) {
            tracing::debug!("Discarding stale results for {:?} ({})", search.query, generation);
            return;
        }

        render_all(view, pending);
        view.render(ViewUpdate::ClearLoader);
        match fetched {
            Ok(()) => {
                tracing::info!("Found {} recipes for {:?}", search.results.len(), search.query);
                view.render(render_results(&search.results, 1, self.results_per_page));
                state.search = Some(search);
            }
            Err(e) => {
                tracing::error!("Search for {:?} failed: {}", search.query, e);
                view.render(ViewUpdate::Alert {
                    message: SEARCH_ERROR_MESSAGE.to_string(),
                });
            }
        }
    }

    async fn go_to_page<V: View>(&self, page: usize, view: &V) {
        let state = self.state.lock().await;
        let Some(search) = state.search.as_ref() else {
            tracing::debug!("No search results to paginate");
            return;
        };
        view.render(ViewUpdate::ClearResults);
        view.render(render_results(&search.results, page, self.results_per_page));
    }

    async fn control_recipe<V: View>(&self, hash: &str, view: &V) {
        let Some(id) = recipe_id_from_hash(hash) else {
            return;
        };

        let generation = self.recipe_generation.next();
        let mut pending = vec![
            ViewUpdate::ClearRecipe,
            ViewUpdate::RenderLoader {
                target: LoaderTarget::Recipe,
            },
        ];
        if self.state.lock().await.search.is_some() {
            pending.push(ViewUpdate::HighlightSelected { id: id.to_string() });
        }

        tracing::info!("Loading recipe {} ({})", id, generation);
        let loaded = self.load_recipe(id).await;

        let mut state = self.state.lock().await;
        if !self.recipe_generation.is_current(generation) {
            tracing::debug!("Discarding stale recipe {} ({})", id, generation);
            return;
        }

        render_all(view, pending);
        view.render(ViewUpdate::ClearLoader);
        match loaded {
            Ok(recipe) => {
                let liked = match self.likes_mut(&mut state) {
                    Ok(likes) => likes.is_liked(&recipe.id),
                    Err(e) => {
                        tracing::warn!("Failed to read liked recipes: {}", e);
                        false
                    }
                };
                view.render(ViewUpdate::RenderRecipe {
                    recipe: recipe.clone(),
                    liked,
                });
                state.recipe = Some(recipe);
            }
            Err(e) => {
                tracing::warn!("Failed to load recipe {}: {}", id, e);
                // The view was cleared, so nothing may act on the old recipe.
                state.recipe = None;
                view.render(ViewUpdate::Alert {
                    message: RECIPE_ERROR_MESSAGE.to_string(),
                });
            }
        }
    }

    /// Fetch, parse and derive a recipe without touching shared state.
    async fn load_recipe(&self, id: &str) -> Result<Recipe, CoreError> {
        let mut recipe = Recipe::new(id);
        recipe.get_recipe(self.source.as_ref()).await?;
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings();
        Ok(recipe)
    }

    async fn update_servings<V: View>(&self, direction: ServingsDirection, view: &V) {
        let mut state = self.state.lock().await;
        let Some(recipe) = state.recipe.as_mut() else {
            return;
        };
        if recipe.update_servings(direction) {
            view.render(render_servings(recipe));
        }
    }

    async fn control_list<V: View>(&self, view: &V) {
        let mut state = self.state.lock().await;
        let ApplicationState { recipe, list, .. } = &mut *state;
        let Some(recipe) = recipe.as_ref() else {
            tracing::debug!("No recipe loaded, nothing to add to the list");
            return;
        };

        let list = list.get_or_insert_with(ShoppingList::new);
        for ingredient in &recipe.ingredients {
            list.add_item(ingredient.count, &ingredient.unit, &ingredient.ingredient);
        }
        tracing::info!(
            "Added {} ingredients of {} to the shopping list",
            recipe.ingredients.len(),
            recipe.id
        );

        view.render(ViewUpdate::ClearItems);
        for item in list.items() {
            view.render(ViewUpdate::RenderItem { item: item.clone() });
        }
    }

    async fn control_like<V: View>(&self, view: &V) {
        let mut state = self.state.lock().await;
        let Some(recipe) = state.recipe.as_ref() else {
            tracing::debug!("No recipe loaded, nothing to like");
            return;
        };
        let (id, title, author, image) = (
            recipe.id.clone(),
            recipe.title.clone(),
            recipe.author.clone(),
            recipe.image.clone(),
        );

        let likes = match self.likes_mut(&mut state) {
            Ok(likes) => likes,
            Err(e) => {
                tracing::warn!("Not toggling like for {}, likes unreadable: {}", id, e);
                view.render(ViewUpdate::Alert {
                    message: LIKES_LOAD_ERROR_MESSAGE.to_string(),
                });
                return;
            }
        };

        match likes.add_like(&id, &title, &author, &image) {
            Ok(Some(like)) => {
                view.render(ViewUpdate::ToggleLikeBtn { liked: true });
                view.render(ViewUpdate::RenderLike { like });
            }
            // Already liked
            Ok(None) => match likes.delete_like(&id) {
                Ok(_) => {
                    view.render(ViewUpdate::ToggleLikeBtn { liked: false });
                    view.render(ViewUpdate::DeleteLike { id });
                }
                Err(e) => {
                    tracing::warn!("Failed to remove like for {}: {}", id, e);
                    view.render(ViewUpdate::Alert {
                        message: LIKES_ERROR_MESSAGE.to_string(),
                    });
                }
            },
            Err(e) => {
                tracing::warn!("Failed to save like for {}: {}", id, e);
                view.render(ViewUpdate::Alert {
                    message: LIKES_ERROR_MESSAGE.to_string(),
                });
            }
        }

        view.render(render_like_menu(likes.num_likes()));
    }

    async fn restore_likes<V: View>(&self, view: &V) {
        let mut state = self.state.lock().await;
        let likes = match self.likes_mut(&mut state) {
            Ok(likes) => likes,
            Err(e) => {
                tracing::error!("Failed to restore liked recipes: {}", e);
                view.render(ViewUpdate::Alert {
                    message: LIKES_LOAD_ERROR_MESSAGE.to_string(),
                });
                return;
            }
        };
        tracing::info!("Restored {} liked recipes", likes.num_likes());

        view.render(render_like_menu(likes.num_likes()));
        for like in likes.likes() {
            view.render(ViewUpdate::RenderLike { like: like.clone() });
        }
    }

    async fn delete_item<V: View>(&self, id: Uuid, view: &V) {
        let mut state = self.state.lock().await;
        let removed = state.list.as_mut().is_some_and(|list| list.delete_item(id));
        if removed {
            view.render(ViewUpdate::DeleteItem { id });
        } else {
            tracing::debug!("Shopping list item {} not found", id);
        }
    }

    async fn update_item_count(&self, id: Uuid, count: f64) {
        let mut state = self.state.lock().await;
        let updated = state
            .list
            .as_mut()
            .is_some_and(|list| list.update_count(id, count));
        if !updated {
            tracing::debug!("Shopping list item {} not found", id);
        }
    }

    /// The likes collection, restored from storage on first use.
    ///
    /// A failed read caches nothing, so no write can replace the stored
    /// collection before it has been read successfully.
    fn likes_mut<'a>(
        &self,
        state: &'a mut ApplicationState,
    ) -> Result<&'a mut Likes, StorageError> {
        let likes = match state.likes.take() {
            Some(likes) => likes,
            None => {
                let mut likes = Likes::new(self.like_store.clone());
                likes.read_storage()?;
                likes
            }
        };
        Ok(state.likes.insert(likes))
    }
}

fn render_all<V: View>(view: &V, updates: Vec<ViewUpdate>) {
    for update in updates {
        view.render(update);
    }
}
