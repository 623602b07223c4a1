use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use storage_gateway::{
    config::Config, create_router, logging, storage::SupabaseStorageClient, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    logging::init_logging(config.log_format, env!("CARGO_PKG_NAME"))?;

    info!("Starting Storage Gateway...");

    let storage = SupabaseStorageClient::new(config.storage.clone())
        .context("Failed to initialize storage client")?;
    info!("Storage client initialized for bucket {}", config.storage.bucket);

    let state = AppState::new(Arc::new(storage));
    let app = create_router(state, config.server.max_upload_bytes);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Storage Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
