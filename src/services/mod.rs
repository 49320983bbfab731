pub mod color_extractor;
pub mod filename;
pub mod image_storage;
pub mod ingest;
pub mod record_store;

pub use color_extractor::{ColorExtractor, FALLBACK_COLOR};
pub use filename::{is_allowed_filename, validate_filename, FilenameError};
pub use image_storage::ImageStorage;
pub use ingest::{IngestError, IngestRequest, IngestService};
pub use record_store::{InMemoryStore, JsonFileStore, RecordStore};
