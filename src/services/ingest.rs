use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::error::StoreError;
use crate::models::ImageColorRecord;
use crate::services::color_extractor::{ColorExtractor, FALLBACK_COLOR};
use crate::services::filename::{validate_filename, FilenameError};
use crate::services::image_storage::ImageStorage;
use crate::services::record_store::RecordStore;

/// An uploaded image waiting to be stored and tagged
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Category chosen by the uploader; the configured default when `None`
    pub card_type: Option<String>,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Upload rejected: {0}")]
    Rejected(#[from] FilenameError),

    #[error("Failed to save image: {0}")]
    Storage(#[source] std::io::Error),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

/// Upload pipeline: validate, store the file, extract its color, record it
pub struct IngestService {
    storage: ImageStorage,
    extractor: Arc<ColorExtractor>,
    store: Arc<dyn RecordStore>,
    default_card_type: String,
}

impl IngestService {
    pub fn new(
        storage: ImageStorage,
        extractor: Arc<ColorExtractor>,
        store: Arc<dyn RecordStore>,
        default_card_type: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            extractor,
            store,
            default_card_type: default_card_type.into(),
        }
    }

    pub fn storage(&self) -> &ImageStorage {
        &self.storage
    }

    /// Process one upload and return the stored record.
    ///
    /// The filename is checked before anything touches the disk. Extraction
    /// failures never fail the upload; the record then carries
    /// [`FALLBACK_COLOR`].
    pub async fn ingest(&self, request: IngestRequest) -> Result<ImageColorRecord, IngestError> {
        validate_filename(&request.filename)?;

        let path = self
            .storage
            .save(&request.filename, &request.bytes)
            .await
            .map_err(IngestError::Storage)?;

        let color = self.extract_in_blocking_context(path).await;
        let card_type = request
            .card_type
            .unwrap_or_else(|| self.default_card_type.clone());

        let record = ImageColorRecord::new(request.filename, color, card_type);
        self.store.upsert(record.clone()).await?;

        tracing::info!(
            image = %record.image,
            color = %record.hex(),
            card_type = %record.card_type,
            "Image ingested"
        );

        Ok(record)
    }

    /// Run CPU-bound clustering on the blocking pool
    async fn extract_in_blocking_context(&self, path: PathBuf) -> [u8; 3] {
        let extractor = self.extractor.clone();

        match tokio::task::spawn_blocking(move || extractor.extract(&path)).await {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!(error = %e, "Color extraction task failed, using fallback");
                FALLBACK_COLOR
            }
        }
    }
}
