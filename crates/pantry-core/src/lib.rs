//! Pantry Core - Recipe state, ingredient parsing, and the controller.
//!
//! This crate owns the application state (search, recipe, shopping list,
//! likes) and the controller that turns view commands into state changes and
//! render instructions. The remote API and durable storage are reached
//! through the [`RecipeSource`] and [`LikeStore`] traits.

pub mod command;
pub mod controller;
pub mod error;
pub mod generation;
pub mod ingredient;
pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;
pub mod source;
pub mod storage;
pub mod view;

// Re-exports for convenience
pub use command::Command;
pub use controller::{ApplicationState, Controller};
pub use error::{CoreError, SourceError, StorageError};
pub use generation::{Generation, RequestGeneration};
pub use ingredient::{parse_ingredient, Ingredient};
pub use likes::{Like, Likes};
pub use list::{ShoppingItem, ShoppingList};
pub use recipe::{Recipe, ServingsDirection};
pub use search::Search;
pub use source::{RecipeData, RecipeSource, RecipeSummary};
pub use storage::{LikeStore, LIKES_KEY};
pub use view::{RecordingView, View, ViewUpdate};

#[cfg(any(test, feature = "test-utils"))]
pub use source::fake::FakeRecipeSource;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::memory::InMemoryLikeStore;
