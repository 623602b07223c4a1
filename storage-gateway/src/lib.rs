//! HTTP facade over a Supabase Storage bucket: upload files, hand out public
//! URLs, and delete objects. All persistence is delegated to the provider.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod storage;

use storage::StorageProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageProvider>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }
}

/// Build the gateway router. `max_upload_bytes` bounds the `/upload` body.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/upload",
            post(handlers::upload::upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/file", get(handlers::public_url::get_public_url))
        .route("/delete/:path", delete(handlers::delete::delete_file))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
