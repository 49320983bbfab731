//! K-means clustering over RGB samples.
//!
//! [`KMeans`] is a small builder: configure it once, then call
//! [`fit()`](KMeans::fit) on as many pixel sets as needed.

mod init;

pub use init::{Init, InitCount};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clustering::Clustering;
use crate::color::Rgb;
use crate::error::ClusterError;

/// K-means clustering configuration.
///
/// # Example
///
/// ```
/// use dominant_color::{Init, InitCount, KMeans, Rgb};
///
/// let kmeans = KMeans::new(3)
///     .init(Init::Random)
///     .n_init(InitCount::Fixed(4))
///     .max_iterations(50)
///     .seed(Some(42));
///
/// let pixels: Vec<Rgb> = (0..30u8).map(|v| Rgb::from_bytes([v * 8, 0, 0])).collect();
/// let clustering = kmeans.fit(&pixels).unwrap();
/// assert_eq!(clustering.centroids().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    clusters: usize,
    init: Init,
    n_init: InitCount,
    max_iterations: usize,
    tolerance: f64,
    seed: Option<u64>,
}

impl KMeans {
    /// Default iteration cap per run.
    pub const DEFAULT_MAX_ITERATIONS: usize = 300;

    /// Default relative convergence tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;

    /// Create a configuration for `clusters` clusters.
    ///
    /// Defaults: k-means++ seeding, automatic run count, 300 iterations,
    /// tolerance 1e-4, entropy-seeded randomness.
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            init: Init::default(),
            n_init: InitCount::default(),
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
            seed: None,
        }
    }

    /// Set the seeding strategy.
    #[inline]
    pub fn init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Set how many seeded runs to perform.
    #[inline]
    pub fn n_init(mut self, n_init: InitCount) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the iteration cap per run.
    #[inline]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relative convergence tolerance.
    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fix the random seed, or `None` to seed from OS entropy.
    #[inline]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Number of clusters.
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Cluster `points`.
    ///
    /// Runs the configured number of seeded Lloyd iterations and keeps the
    /// run with the lowest inertia.
    pub fn fit(&self, points: &[Rgb]) -> Result<Clustering, ClusterError> {
        let runs = self.validate(points)?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tol = scaled_tolerance(points, self.tolerance);

        let mut best: Option<Clustering> = None;
        for _ in 0..runs {
            let seeds = init::seed_centroids(self.init, points, self.clusters, &mut rng);
            let run = lloyd(points, seeds, self.max_iterations, tol);
            if best.as_ref().map_or(true, |b| run.inertia() < b.inertia()) {
                best = Some(run);
            }
        }

        best.ok_or(ClusterError::InvalidParameter("n_init must be at least 1"))
    }

    fn validate(&self, points: &[Rgb]) -> Result<usize, ClusterError> {
        if self.clusters == 0 {
            return Err(ClusterError::NoClusters);
        }
        let runs = self.n_init.resolve(self.init);
        if runs == 0 {
            return Err(ClusterError::InvalidParameter("n_init must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(ClusterError::InvalidParameter(
                "max_iterations must be at least 1",
            ));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ClusterError::InvalidParameter(
                "tolerance must be non-negative",
            ));
        }
        if points.len() < self.clusters {
            return Err(ClusterError::TooFewSamples {
                samples: points.len(),
                clusters: self.clusters,
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ClusterError::NonFiniteSample { index });
        }
        Ok(runs)
    }
}

/// Absolute tolerance: `tolerance` times the mean per-channel variance.
fn scaled_tolerance(points: &[Rgb], tolerance: f64) -> f64 {
    let n = points.len() as f64;
    let mut mean = [0.0f64; 3];
    for p in points {
        for (m, c) in mean.iter_mut().zip(p.channels()) {
            *m += c;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut variance = [0.0f64; 3];
    for p in points {
        for ((v, m), c) in variance.iter_mut().zip(mean).zip(p.channels()) {
            *v += (c - m) * (c - m);
        }
    }

    variance.iter().map(|v| v / n).sum::<f64>() / 3.0 * tolerance
}

fn lloyd(points: &[Rgb], mut centroids: Vec<Rgb>, max_iterations: usize, tol: f64) -> Clustering {
    let mut labels = assign(points, &centroids);
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;

        let updated = update_centroids(points, &labels, &centroids);
        let shift: f64 = centroids
            .iter()
            .zip(&updated)
            .map(|(old, new)| old.distance_squared(*new))
            .sum();
        centroids = updated;

        let relabeled = assign(points, &centroids);
        let stable = relabeled == labels;
        labels = relabeled;

        if stable || shift <= tol {
            break;
        }
    }

    Clustering::new(points, centroids, labels, iterations)
}

/// Index of the nearest centroid; the lowest index wins ties.
#[inline]
pub(crate) fn nearest(point: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = point.distance_squared(*c);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

fn assign(points: &[Rgb], centroids: &[Rgb]) -> Vec<usize> {
    points.iter().map(|p| nearest(*p, centroids)).collect()
}

fn update_centroids(points: &[Rgb], labels: &[usize], previous: &[Rgb]) -> Vec<Rgb> {
    let k = previous.len();
    let mut sums = vec![[0.0f64; 3]; k];
    let mut counts = vec![0usize; k];

    for (p, &label) in points.iter().zip(labels) {
        for (s, c) in sums[label].iter_mut().zip(p.channels()) {
            *s += c;
        }
        counts[label] += 1;
    }

    let mut centroids: Vec<Rgb> = sums
        .iter()
        .zip(&counts)
        .zip(previous)
        .map(|((sum, &count), &prev)| {
            if count == 0 {
                prev
            } else {
                let n = count as f64;
                Rgb::new(sum[0] / n, sum[1] / n, sum[2] / n)
            }
        })
        .collect();

    relocate_empty(points, labels, previous, &counts, &mut centroids);
    centroids
}

/// Move each empty cluster onto one of the points farthest from their
/// current centroid. Points that sit exactly on a centroid are never used.
fn relocate_empty(
    points: &[Rgb],
    labels: &[usize],
    previous: &[Rgb],
    counts: &[usize],
    centroids: &mut [Rgb],
) {
    let empty: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count == 0)
        .map(|(i, _)| i)
        .collect();
    if empty.is_empty() {
        return;
    }

    let mut far: Vec<(usize, f64)> = points
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (p, &label))| (i, p.distance_squared(previous[label])))
        .collect();
    far.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (cluster, (index, distance)) in empty.into_iter().zip(far) {
        if distance > 0.0 {
            centroids[cluster] = points[index];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Rgb {
        Rgb::from_bytes([v, v, v])
    }

    #[test]
    fn test_nearest_prefers_lowest_index_on_tie() {
        let centroids = [gray(10), gray(30), gray(10)];
        assert_eq!(nearest(gray(20), &centroids), 0);
        assert_eq!(nearest(gray(10), &centroids), 0);
        assert_eq!(nearest(gray(29), &centroids), 1);
    }

    #[test]
    fn test_scaled_tolerance_zero_for_constant_input() {
        let points = vec![gray(77); 16];
        assert_eq!(scaled_tolerance(&points, 1e-4), 0.0);
    }

    #[test]
    fn test_scaled_tolerance_uses_mean_variance() {
        // red channel variance 100, others 0 -> mean variance 100/3
        let points = [Rgb::new(0.0, 0.0, 0.0), Rgb::new(20.0, 0.0, 0.0)];
        let tol = scaled_tolerance(&points, 3.0);
        assert!((tol - 100.0).abs() < 1e-9, "got {tol}");
    }

    #[test]
    fn test_update_centroids_means() {
        let points = [gray(0), gray(10), gray(100), gray(200)];
        let labels = [0, 0, 1, 1];
        let centroids = update_centroids(&points, &labels, &[gray(0), gray(0)]);
        assert_eq!(centroids, vec![gray(5), gray(150)]);
    }

    #[test]
    fn test_update_centroids_relocates_empty_cluster() {
        let points = [gray(0), gray(2), gray(250)];
        let labels = [0, 0, 0];
        let previous = [gray(1), gray(1)];
        let centroids = update_centroids(&points, &labels, &previous);
        assert_eq!(centroids[1], gray(250), "empty cluster should jump to the outlier");
    }

    #[test]
    fn test_update_centroids_keeps_empty_cluster_when_nothing_is_far() {
        let points = [gray(5), gray(5)];
        let labels = [0, 0];
        let previous = [gray(5), gray(99)];
        let centroids = update_centroids(&points, &labels, &previous);
        assert_eq!(centroids, vec![gray(5), gray(99)]);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let points = vec![gray(1); 8];
        assert_eq!(
            KMeans::new(0).fit(&points).unwrap_err(),
            ClusterError::NoClusters
        );
        assert!(matches!(
            KMeans::new(2).max_iterations(0).fit(&points),
            Err(ClusterError::InvalidParameter(_))
        ));
        assert!(matches!(
            KMeans::new(2).n_init(InitCount::Fixed(0)).fit(&points),
            Err(ClusterError::InvalidParameter(_))
        ));
        assert!(matches!(
            KMeans::new(2).tolerance(f64::NAN).fit(&points),
            Err(ClusterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_sample() {
        let mut points = vec![gray(1); 8];
        points[5] = Rgb::new(1.0, f64::NAN, 1.0);
        assert_eq!(
            KMeans::new(2).fit(&points).unwrap_err(),
            ClusterError::NonFiniteSample { index: 5 }
        );
    }

    #[test]
    fn test_fit_separates_two_groups() {
        let mut points = vec![gray(10); 20];
        points.extend(vec![gray(240); 20]);

        let clustering = KMeans::new(2).seed(Some(11)).fit(&points).unwrap();
        let mut centroids: Vec<[u8; 3]> =
            clustering.centroids().iter().map(|c| c.to_bytes()).collect();
        centroids.sort();
        assert_eq!(centroids, vec![[10, 10, 10], [240, 240, 240]]);
        assert_eq!(clustering.inertia(), 0.0);
    }

    #[test]
    fn test_fit_random_init_runs_multiple_times() {
        let points: Vec<Rgb> = (0..60u8).map(|v| gray(v * 4)).collect();
        let clustering = KMeans::new(3)
            .init(Init::Random)
            .seed(Some(5))
            .fit(&points)
            .unwrap();
        assert_eq!(clustering.labels().len(), 60);
        assert!(clustering.iterations() >= 1);
    }
}
