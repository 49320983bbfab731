pub mod config;
pub mod record;

pub use config::{AppConfig, ExtractionConfig};
pub use record::{ImageColorRecord, DEFAULT_CARD_TYPE};
