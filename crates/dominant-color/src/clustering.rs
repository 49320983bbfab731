//! Clustering result and dominant cluster selection.

use crate::color::Rgb;

/// Result of a k-means run.
///
/// Holds one centroid per cluster, one label per input sample, and the
/// inertia (sum of squared distances from samples to their centroid).
#[derive(Debug, Clone)]
pub struct Clustering {
    centroids: Vec<Rgb>,
    labels: Vec<usize>,
    inertia: f64,
    iterations: usize,
}

impl Clustering {
    pub(crate) fn new(
        points: &[Rgb],
        centroids: Vec<Rgb>,
        labels: Vec<usize>,
        iterations: usize,
    ) -> Self {
        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(p, &label)| p.distance_squared(centroids[label]))
            .sum();

        Self {
            centroids,
            labels,
            inertia,
            iterations,
        }
    }

    /// Cluster centroids, indexed by cluster.
    pub fn centroids(&self) -> &[Rgb] {
        &self.centroids
    }

    /// Cluster index of each input sample, in input order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Sum of squared distances from each sample to its centroid.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Lloyd iterations performed by the winning run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of samples assigned to each cluster.
    ///
    /// Always has one entry per centroid; clusters that ended up empty
    /// report zero.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.centroids.len()];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }

    /// Index of the most populous cluster. The lowest index wins ties.
    pub fn dominant_cluster(&self) -> usize {
        let mut best = 0;
        let mut best_count = 0;
        for (i, count) in self.counts().into_iter().enumerate() {
            if count > best_count {
                best = i;
                best_count = count;
            }
        }
        best
    }

    /// Centroid of the most populous cluster.
    pub fn dominant(&self) -> Rgb {
        self.centroids[self.dominant_cluster()]
    }
}
