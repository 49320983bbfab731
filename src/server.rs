//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, ImageColorRecord};
use crate::services::{ColorExtractor, ImageStorage, IngestService, JsonFileStore, RecordStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assets: Arc<AssetLoader>,
    pub store: Arc<dyn RecordStore>,
    pub ingest: Arc<IngestService>,
}

/// Create application state from a loaded config and an asset loader.
///
/// Creates the image directory if it does not exist yet.
pub fn create_app_state(config: AppConfig, assets: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let storage = ImageStorage::new(&config.images_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create image directory {}: {e}",
            config.images_dir.display()
        )
    })?;
    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(&config.colors_file));
    let extractor = Arc::new(ColorExtractor::new(&config.extraction));
    let ingest = Arc::new(IngestService::new(
        storage,
        extractor,
        store.clone(),
        config.default_card_type.clone(),
    ));

    Ok(AppState {
        config: Arc::new(config),
        assets,
        store,
        ingest,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Paths not
/// claimed by a route are served from the front-end assets.
pub fn build_router(state: AppState) -> Router {
    let images = ServeDir::new(&state.config.images_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(api::handle_index))
        .route("/upload", post(handle_upload))
        .route("/colors.json", get(handle_manifest))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Uploaded images, served as stored
        .nest_service("/images", images)
        .fallback(handle_static)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_upload(State(state.ingest), multipart).await
}

async fn handle_manifest(
    State(state): State<AppState>,
) -> Result<Json<Vec<ImageColorRecord>>, ApiError> {
    api::handle_manifest(State(state.store)).await
}

async fn handle_static(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    api::handle_static(State(state.assets), method, uri).await
}
