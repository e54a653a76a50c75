//! services/api/src/bin/api.rs

use api_lib::{
    adapters::db::DbAdapter,
    config::Config,
    error::ApiError,
    web::{cors_layer, router, state::AppState},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Database & Create the Schema ---
    info!("Opening database at {}...", config.database_url);
    let db_pool = DbAdapter::connect(&config.database_url, config.db_max_connections).await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState { db: db_adapter });

    // --- 4. Create the Web Router ---
    let app = router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "OpenAPI document available at http://{}/api-docs/openapi.json",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
