use crate::error::StoreError;
use crate::models::ImageColorRecord;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// Trait for the image/color manifest
///
/// Holds at most one record per image filename.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record, replacing any record with the same image filename
    async fn upsert(&self, record: ImageColorRecord) -> Result<(), StoreError>;

    /// All records, in storage order
    async fn read_all(&self) -> Result<Vec<ImageColorRecord>, StoreError>;
}

fn replace_record(records: &mut Vec<ImageColorRecord>, record: ImageColorRecord) {
    records.retain(|r| r.image != record.image);
    records.push(record);
}

/// Manifest kept as a single JSON array on disk
///
/// Every upsert reads the whole document, replaces the record and rewrites
/// the document through a temporary file and a rename. Upserts from one
/// process are serialized; separate processes sharing the file still race.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<ImageColorRecord>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Malformed),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, records: &[ImageColorRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "records.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn upsert(&self, record: ImageColorRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        let image = record.image.clone();
        replace_record(&mut records, record);
        self.persist(&records).await?;

        tracing::debug!(image = %image, total = records.len(), "Record stored");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ImageColorRecord>, StoreError> {
        self.load().await
    }
}

/// In-memory manifest with the same upsert semantics
pub struct InMemoryStore {
    records: RwLock<Vec<ImageColorRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn upsert(&self, record: ImageColorRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        replace_record(&mut records, record);
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<ImageColorRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}
