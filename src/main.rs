use axum::serve;
use catalog_api::api::routes::create_router;
use catalog_api::config::{AppConfig, StorageBackend};
use catalog_api::seed;
use catalog_api::store::traits::ProductStore;
use catalog_api::store::{CsvStore, MemoryStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new().filter_level(LevelFilter::Info).init();

    println!("Product Catalog API");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    match config.storage.backend {
        StorageBackend::Csv => {
            println!("Using CSV storage at {}", config.storage.path);
            let store = Arc::new(CsvStore::new(&config.storage.path));
            maybe_load_seed_data(&*store).await?;
            run_server(create_router().with_state(store), &config).await
        }
        StorageBackend::Memory => {
            println!("Using in-memory storage (contents are lost on restart)");
            let store = Arc::new(MemoryStore::new());
            maybe_load_seed_data(&*store).await?;
            run_server(create_router().with_state(store), &config).await
        }
    }
}

async fn maybe_load_seed_data<S: ProductStore>(store: &S) -> anyhow::Result<()> {
    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(store).await?;
        println!("Seed data loaded successfully");
    }
    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Catalog server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
