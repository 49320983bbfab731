use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Card type stored when the uploader does not pick one
pub const DEFAULT_CARD_TYPE: &str = "card_medium";

/// One manifest entry: an uploaded image and its dominant color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageColorRecord {
    /// Stored filename, unique within the manifest
    #[schema(example = "sunset.jpg")]
    pub image: String,
    /// Dominant color as `[R, G, B]`
    #[schema(value_type = Vec<u8>)]
    pub color: [u8; 3],
    /// Free-form category chosen by the uploader
    #[schema(example = "card_medium")]
    pub card_type: String,
}

impl ImageColorRecord {
    pub fn new(image: impl Into<String>, color: [u8; 3], card_type: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            color,
            card_type: card_type.into(),
        }
    }

    /// Color as a lowercase `#rrggbb` string
    pub fn hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}
