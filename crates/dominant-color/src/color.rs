//! RGB color points
//!
//! Pixels and centroids share one representation: a point in the RGB cube
//! with floating point channels on the 8-bit scale.

/// A color as a point in the RGB cube.
///
/// Channels are in the range 0.0..=255.0 so that centroids keep the units of
/// the 8-bit pixels they were averaged from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel (0.0..=255.0)
    pub r: f64,
    /// Green channel (0.0..=255.0)
    pub g: f64,
    /// Blue channel (0.0..=255.0)
    pub b: f64,
}

impl Rgb {
    /// Create a color from float channel values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from an 8-bit `[R, G, B]` triple.
    ///
    /// # Example
    /// ```
    /// use dominant_color::Rgb;
    /// let red = Rgb::from_bytes([255, 0, 0]);
    /// assert_eq!(red.r, 255.0);
    /// ```
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            r: bytes[0] as f64,
            g: bytes[1] as f64,
            b: bytes[2] as f64,
        }
    }

    /// Convert to an 8-bit `[R, G, B]` triple.
    ///
    /// Each channel is clamped to 0..=255 and then truncated toward zero,
    /// so a centroid channel of 254.9 becomes 254.
    ///
    /// # Example
    /// ```
    /// use dominant_color::Rgb;
    /// let color = Rgb::new(254.9, 0.4, 300.0);
    /// assert_eq!(color.to_bytes(), [254, 0, 255]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            truncate_channel(self.r),
            truncate_channel(self.g),
            truncate_channel(self.b),
        ]
    }

    /// Squared Euclidean distance to another color.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub(crate) fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(channels: [f64; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

// NaN saturates to 0 through the cast.
#[inline]
fn truncate_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
