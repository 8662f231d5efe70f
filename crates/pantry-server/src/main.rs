use std::sync::Arc;

use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pantry_client::HttpRecipeSource;
use pantry_core::Controller;
use pantry_db::{init_database, RedbLikeStore};
use pantry_server::{routes, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: PANTRY_LISTEN_ADDR, PANTRY_DB_PATH, PANTRY_API_URL");
            eprintln!("Optional: PANTRY_STATIC_DIR, PANTRY_RESULTS_PER_PAGE, PANTRY_REQUEST_TIMEOUT_SECS");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Pantry server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Database path: {}", config.db_path.display());
    tracing::info!("Recipe API: {}", config.api_url);

    // Initialize database
    let db = match init_database(&config.db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Database error: {}", e);
            std::process::exit(1);
        }
    };
    let like_store = Arc::new(RedbLikeStore::new(db));

    let source = match HttpRecipeSource::new(config.api_url.clone(), config.request_timeout) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("HTTP client error: {}", e);
            std::process::exit(1);
        }
    };

    let controller = Controller::new(Arc::new(source), like_store)
        .with_results_per_page(config.results_per_page);
    let state = AppState::new(controller);

    // Build router; everything that is not an API route is a view asset
    let app = routes::create_router(state).fallback_service(ServeDir::new(&config.static_dir));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
