pub mod api;
pub mod config;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{CsvStore, MemoryStore, ProductStore};

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    match config.storage.backend {
        crate::config::StorageBackend::Csv => {
            let store = Arc::new(crate::store::CsvStore::new(&config.storage.path));
            serve(
                listener,
                crate::api::routes::create_router().with_state(store),
            )
            .await?;
        }
        crate::config::StorageBackend::Memory => {
            let store = Arc::new(crate::store::MemoryStore::new());
            serve(
                listener,
                crate::api::routes::create_router().with_state(store),
            )
            .await?;
        }
    }

    Ok(())
}
