use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::ImageColorRecord;
use crate::services::RecordStore;

/// Image/color manifest
///
/// Every known image with its dominant color and card type. Order is not
/// significant. An empty manifest is returned as `[]`.
#[utoipa::path(
    get,
    path = "/colors.json",
    responses(
        (status = 200, description = "All image/color records", body = Vec<ImageColorRecord>),
        (status = 500, description = "Manifest document unreadable or malformed"),
    ),
    tag = "Images"
)]
pub async fn handle_manifest(
    State(store): State<Arc<dyn RecordStore>>,
) -> Result<Json<Vec<ImageColorRecord>>, ApiError> {
    let records = store.read_all().await?;
    tracing::debug!(count = records.len(), "Serving manifest");
    Ok(Json(records))
}
