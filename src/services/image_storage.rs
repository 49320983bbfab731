use std::io;
use std::path::{Path, PathBuf};

/// On-disk storage for uploaded images, keyed by filename
pub struct ImageStorage {
    dir: PathBuf,
}

impl ImageStorage {
    /// Use `dir` for image files, creating it if missing.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory images are stored in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the image stored under `filename`
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Write `bytes` under `filename`, replacing any previous file.
    ///
    /// `filename` must already be validated as a single path component.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored image");
        Ok(path)
    }
}
