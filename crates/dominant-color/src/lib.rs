//! dominant-color: representative colors by k-means pixel clustering
//!
//! This library partitions a set of RGB pixels into `k` clusters and reports
//! the centroid of the most populous cluster as the image's dominant color.
//! It does no I/O: callers decode and resize images themselves and hand over
//! a flat slice of [`Rgb`] samples.
//!
//! # Quick Start
//!
//! ```
//! use dominant_color::{KMeans, Rgb};
//!
//! let mut pixels = vec![Rgb::from_bytes([200, 30, 30]); 90];
//! pixels.extend(vec![Rgb::from_bytes([10, 10, 240]); 10]);
//!
//! let clustering = KMeans::new(2).seed(Some(7)).fit(&pixels).unwrap();
//! assert_eq!(clustering.dominant().to_bytes(), [200, 30, 30]);
//! ```
//!
//! # Algorithm
//!
//! [`KMeans::fit`] runs Lloyd's algorithm:
//!
//! ```text
//! seed k centroids (k-means++ or random)
//!     |
//!     v
//! assign every pixel to its nearest centroid   <-----+
//!     |                                              |
//!     v                                              |
//! move each centroid to the mean of its pixels       |
//! (empty clusters jump to the farthest pixel)        |
//!     |                                              |
//!     +-- labels changed and shift > tol ------------+
//!     |
//!     v
//! Clustering { centroids, labels, inertia }
//! ```
//!
//! Distances are squared Euclidean in the 0..=255 RGB cube. The
//! convergence tolerance is relative: it is multiplied by the mean
//! per-channel variance of the input, so the same `tolerance` behaves the
//! same way for dark, low-contrast images and for saturated ones.
//!
//! With [`InitCount::Auto`] the number of independent seeded runs is chosen
//! from the seeding strategy: one run for k-means++ (its seeding is already
//! spread out) and ten for uniform random seeding. The run with the lowest
//! inertia is kept.
//!
//! # Determinism
//!
//! Seeding is random. Without a seed the generator is drawn from OS entropy
//! and repeated calls may return slightly different centroids. Passing
//! [`KMeans::seed`] makes the result reproducible.

pub mod clustering;
pub mod color;
pub mod error;
pub mod kmeans;


pub use clustering::Clustering;
pub use color::Rgb;
pub use error::ClusterError;
pub use kmeans::{Init, InitCount, KMeans};

/// Dominant color of `pixels` using `clusters` clusters and default settings.
///
/// Shorthand for `KMeans::new(clusters).fit(pixels)?.dominant()`.
pub fn dominant_color(pixels: &[Rgb], clusters: usize) -> Result<Rgb, ClusterError> {
    Ok(KMeans::new(clusters).fit(pixels)?.dominant())
}
