use dominant_color::{KMeans, Rgb};
use image::{imageops::FilterType, DynamicImage};
use std::path::Path;

use crate::error::ExtractError;
use crate::models::ExtractionConfig;

/// Color reported when an image cannot be processed
pub const FALLBACK_COLOR: [u8; 3] = [0, 0, 0];

/// Computes the dominant color of image files.
///
/// The image is converted to RGB, squashed to a `resize x resize` grid
/// (aspect ratio is not preserved) and its pixels are clustered with
/// k-means. The centroid of the largest cluster is the dominant color.
pub struct ColorExtractor {
    kmeans: KMeans,
    resize: u32,
}

impl ColorExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            kmeans: KMeans::new(config.clusters)
                .max_iterations(config.max_iterations)
                .seed(config.seed),
            resize: config.resize,
        }
    }

    /// Dominant color of the image at `path`, or [`FALLBACK_COLOR`].
    ///
    /// Never fails: any read, decode or clustering error is logged and the
    /// fallback is returned instead.
    pub fn extract(&self, path: &Path) -> [u8; 3] {
        match self.try_extract(path) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Dominant color extraction failed, using fallback"
                );
                FALLBACK_COLOR
            }
        }
    }

    /// Dominant color of the image at `path`, reporting why it failed.
    ///
    /// The format is detected from the file content, not its extension.
    pub fn try_extract(&self, path: &Path) -> Result<[u8; 3], ExtractError> {
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)?;
        let color = self.dominant_in_image(&image)?;

        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            color = ?color,
            "Extracted dominant color"
        );

        Ok(color)
    }

    /// Dominant color of an already decoded image.
    pub fn dominant_in_image(&self, image: &DynamicImage) -> Result<[u8; 3], ExtractError> {
        let pixels = self.sample_pixels(image);
        let clustering = self.kmeans.fit(&pixels)?;
        Ok(clustering.dominant().to_bytes())
    }

    fn sample_pixels(&self, image: &DynamicImage) -> Vec<Rgb> {
        let rgb = image.to_rgb8();
        let resized = image::imageops::resize(&rgb, self.resize, self.resize, FilterType::CatmullRom);
        resized.pixels().map(|p| Rgb::from_bytes(p.0)).collect()
    }
}
