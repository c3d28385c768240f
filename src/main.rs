use std::sync::Arc;

use axum::{extract::Request, ServiceExt};
use inventory_api::{
    app::product::repository::PgProductRepository,
    build_app,
    core::middleware::ErrorPolicy,
    infrastructure::{config::AppConfig, database::DatabaseManager, logger::Logger},
    AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("could not initialize app: {}", e);
            std::process::exit(1);
        }
    };

    Logger::init(&config.server.log_level);
    info!("Starting inventory API...");

    let database = DatabaseManager::connect(&config.database)
        .await
        .map_err(|e| {
            error!("Failed to initialize database: {}", e);
            e
        })?;

    if config.server.init_schema {
        database.ensure_schema().await.map_err(|e| {
            error!("Failed to create products table: {}", e);
            e
        })?;
    }

    let repo = Arc::new(PgProductRepository::new(database.get_pool().clone()));
    let state = AppState::new(repo).with_strict_validation(config.server.strict_validation);
    let policy = ErrorPolicy {
        expose_details: config.server.expose_errors,
    };
    let app = build_app(state, policy);

    let listener = TcpListener::bind(config.server.listen_addr())
        .await
        .map_err(|e| {
            error!("Failed to bind {}: {}", config.server.addr, e);
            e
        })?;
    let addr = listener.local_addr()?;

    info!("Inventory API running on http://{}", addr);
    info!("   GET    /products      - List products");
    info!("   GET    /product/:id   - Get product by ID");
    info!("   POST   /product       - Create product");
    info!("   PUT    /product/:id   - Update product");
    info!("   DELETE /product/:id   - Delete product");
    info!("   GET    /health        - Health check");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
