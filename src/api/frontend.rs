//! Web front-end serving (gallery page and its files).

use axum::{
    extract::State,
    http::{header, Method, Uri},
    response::{IntoResponse, Redirect, Response},
};
use std::io;
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;

/// Redirect the site root to the gallery page
pub async fn handle_index() -> Redirect {
    Redirect::to("/index.html")
}

/// Serve a front-end file for any path no other route claimed
pub async fn handle_static(
    State(assets): State<Arc<AssetLoader>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::NotFound);
    }

    let path = uri.path().trim_start_matches('/');
    let data = assets.read_static(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ApiError::NotFound,
        _ => ApiError::Internal(format!("Failed to read {path}: {e}")),
    })?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], data.into_owned()).into_response())
}
