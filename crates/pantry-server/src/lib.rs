//! Pantry Server - Axum host for the recipe controller.

pub mod config;
pub mod routes;
pub mod state;

pub use config::Config;
pub use state::AppState;
