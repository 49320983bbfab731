use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::filename::FilenameError;
use crate::services::ingest::IngestError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file part")]
    MissingFile,

    #[error("Empty filename")]
    EmptyFilename,

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File type not allowed: {0}")]
    DisallowedExtension(String),

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Upload too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FilenameError> for ApiError {
    fn from(e: FilenameError) -> Self {
        match e {
            FilenameError::Empty => ApiError::EmptyFilename,
            FilenameError::Unsafe(name) => ApiError::InvalidFilename(name),
            FilenameError::DisallowedExtension(name) => ApiError::DisallowedExtension(name),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Rejected(e) => e.into(),
            IngestError::Store(e) => ApiError::Store(e),
            IngestError::Storage(e) => ApiError::Internal(format!("Failed to save image: {e}")),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Multipart(e.body_text())
        }
    }
}

/// Failures of the persisted image/color manifest
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record document: {0}")]
    Malformed(serde_json::Error),

    #[error("Failed to encode records: {0}")]
    Encode(serde_json::Error),
}

/// Failures inside dominant color extraction (never surfaced to clients)
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Clustering error: {0}")]
    Cluster(#[from] dominant_color::ClusterError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFile
            | ApiError::EmptyFilename
            | ApiError::InvalidFilename(_)
            | ApiError::DisallowedExtension(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
