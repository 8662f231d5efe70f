//! Pantry Client - HTTP access to the remote recipe API.

pub mod http;
pub mod protocol;

pub use http::HttpRecipeSource;
pub use protocol::{RecipeResponse, SearchResponse};
