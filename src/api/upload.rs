use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ImageColorRecord;
use crate::services::{IngestRequest, IngestService};

/// Multipart form accepted by the upload endpoint
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// Image file (png, jpg, jpeg or webp)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// Card type stored with the image (defaults to the configured card type)
    #[serde(rename = "cardType")]
    card_type: Option<String>,
}

/// Response from a successful upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Status code (200 = success)
    pub status: u16,
    /// Status message
    pub message: String,
    /// The record now stored for this image
    pub record: ImageColorRecord,
}

/// Upload an image
///
/// Stores the file under its own name, computes its dominant color and
/// records `{image, color, card_type}` in the manifest, replacing any earlier
/// record for the same filename. Images that cannot be decoded are still
/// stored and recorded with color `[0, 0, 0]`.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored and color recorded", body = UploadResponse),
        (status = 400, description = "Missing file, empty filename or file type not allowed"),
        (status = 413, description = "Upload too large"),
        (status = 500, description = "Image or manifest could not be written"),
    ),
    tag = "Images"
)]
pub async fn handle_upload(
    State(ingest): State<Arc<IngestService>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut card_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // A "file" part without a filename is a plain form value, not an upload
            Some("file") => {
                if let Some(filename) = field.file_name().map(str::to_owned) {
                    let bytes = field.bytes().await?;
                    file = Some((filename, bytes.to_vec()));
                }
            }
            Some("cardType") => {
                card_type = Some(field.text().await?);
            }
            other => {
                tracing::trace!(field = ?other, "Ignoring unknown upload field");
            }
        }
    }

    let (filename, bytes) = file.ok_or(ApiError::MissingFile)?;

    tracing::info!(
        filename = %filename,
        size = bytes.len(),
        card_type = ?card_type,
        "Upload received"
    );

    let record = ingest
        .ingest(IngestRequest {
            filename,
            bytes,
            card_type,
        })
        .await?;

    Ok(Json(UploadResponse {
        status: 200,
        message: "Upload successful".to_string(),
        record,
    }))
}
