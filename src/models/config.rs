use crate::assets::AssetLoader;
use crate::models::record::DEFAULT_CARD_TYPE;
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory uploaded images are written to and served from
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// JSON document holding the image/color manifest
    #[serde(default = "default_colors_file")]
    pub colors_file: PathBuf,

    /// Card type stored when an upload does not specify one
    #[serde(default = "default_card_type")]
    pub default_card_type: String,

    /// Maximum accepted request body size for uploads, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Dominant color extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_colors_file() -> PathBuf {
    PathBuf::from("colors.json")
}

fn default_card_type() -> String {
    DEFAULT_CARD_TYPE.to_string()
}

fn default_max_upload_bytes() -> usize {
    32 * 1024 * 1024
}

/// Settings for the k-means color extractor
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Number of k-means clusters
    #[serde(default = "default_clusters")]
    pub clusters: usize,

    /// Images are resized to `resize x resize` before clustering
    #[serde(default = "default_resize")]
    pub resize: u32,

    /// Iteration cap per k-means run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Fixed RNG seed for reproducible colors (random when unset)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_clusters() -> usize {
    4
}

fn default_resize() -> u32 {
    100
}

fn default_max_iterations() -> usize {
    300
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            clusters: default_clusters(),
            resize: default_resize(),
            max_iterations: default_max_iterations(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        images_dir = %config.images_dir.display(),
                        colors_file = %config.colors_file.display(),
                        clusters = config.extraction.clusters,
                        resize = config.extraction.resize,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a YAML document, replacing out-of-range extraction values with
    /// their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config.validated())
    }

    /// Override storage locations (from IMAGES_DIR / COLORS_FILE)
    pub fn with_overrides(mut self, images_dir: Option<PathBuf>, colors_file: Option<PathBuf>) -> Self {
        if let Some(dir) = images_dir {
            self.images_dir = dir;
        }
        if let Some(file) = colors_file {
            self.colors_file = file;
        }
        self
    }

    fn validated(mut self) -> Self {
        if self.extraction.clusters == 0 {
            tracing::warn!("extraction.clusters must be at least 1, using default");
            self.extraction.clusters = default_clusters();
        }
        if self.extraction.resize == 0 {
            tracing::warn!("extraction.resize must be at least 1, using default");
            self.extraction.resize = default_resize();
        }
        if self.extraction.max_iterations == 0 {
            tracing::warn!("extraction.max_iterations must be at least 1, using default");
            self.extraction.max_iterations = default_max_iterations();
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            colors_file: default_colors_file(),
            default_card_type: default_card_type(),
            max_upload_bytes: default_max_upload_bytes(),
            extraction: ExtractionConfig::default(),
        }
    }
}
