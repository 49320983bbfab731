//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use huecards::assets::AssetLoader;
use huecards::models::{AppConfig, ExtractionConfig, ImageColorRecord};
use huecards::server::{build_router, create_app_state, AppState};
use huecards::services::RecordStore;

use super::fixtures::Multipart;

/// Test application with router and direct access to its storage
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    /// Holds the image directory and manifest for the lifetime of the test
    dir: TempDir,
}

impl TestApp {
    /// Create a new test application using embedded assets and a fresh
    /// temporary storage directory
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the default test config
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = AppConfig {
            images_dir: dir.path().join("images"),
            colors_file: dir.path().join("colors.json"),
            extraction: ExtractionConfig {
                seed: Some(42),
                ..Default::default()
            },
            ..Default::default()
        };
        adjust(&mut config);

        // Create asset loader with embedded assets only (no external paths)
        let asset_loader = Arc::new(AssetLoader::new(None, None));

        // Create application state using shared server module
        let state = create_app_state(config, asset_loader).expect("Failed to create app state");

        // Build router using shared server module (same as production)
        let router = build_router(state.clone());

        Self { router, state, dir }
    }

    /// Path of the manifest document
    pub fn colors_file(&self) -> PathBuf {
        self.state.config.colors_file.clone()
    }

    /// Path an uploaded image is stored at
    pub fn image_path(&self, filename: &str) -> PathBuf {
        self.state.config.images_dir.join(filename)
    }

    /// Records currently in the store
    pub async fn records(&self) -> Vec<ImageColorRecord> {
        self.state
            .store
            .read_all()
            .await
            .expect("Failed to read records")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a multipart/form-data body
    pub async fn post_multipart(&self, path: &str, form: Multipart) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, form.content_type())
            .body(Body::from(form.finish()))
            .unwrap();
        self.request(request).await
    }

    /// Upload one image through the HTTP API
    pub async fn upload(&self, filename: &str, bytes: &[u8], card_type: Option<&str>) -> TestResponse {
        let mut form = Multipart::new().file("file", filename, bytes);
        if let Some(card_type) = card_type {
            form = form.text("cardType", card_type);
        }
        self.post_multipart("/upload", form).await
    }

    /// Send a request to the router
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Value of a response header, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
