//! Centroid seeding.

use rand::seq::index;
use rand::Rng;

use crate::color::Rgb;

/// Strategy for picking the initial centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Init {
    /// Greedy k-means++: each new centroid is drawn with probability
    /// proportional to its squared distance from the nearest existing one,
    /// keeping the best of several candidates.
    #[default]
    KMeansPlusPlus,
    /// `k` distinct samples chosen uniformly at random.
    Random,
}

/// Number of independently seeded runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitCount {
    /// One run for k-means++, ten for random seeding.
    #[default]
    Auto,
    /// Exactly this many runs.
    Fixed(usize),
}

impl InitCount {
    /// Resolve to a concrete run count for the given seeding strategy.
    pub fn resolve(self, init: Init) -> usize {
        match self {
            InitCount::Fixed(runs) => runs,
            InitCount::Auto => match init {
                Init::KMeansPlusPlus => 1,
                Init::Random => 10,
            },
        }
    }
}

/// Pick `k` initial centroids from `points`.
///
/// Callers guarantee `1 <= k <= points.len()`.
pub(crate) fn seed_centroids<R: Rng + ?Sized>(
    init: Init,
    points: &[Rgb],
    k: usize,
    rng: &mut R,
) -> Vec<Rgb> {
    match init {
        Init::KMeansPlusPlus => kmeans_plus_plus(points, k, rng),
        Init::Random => index::sample(rng, points.len(), k)
            .into_iter()
            .map(|i| points[i])
            .collect(),
    }
}

fn kmeans_plus_plus<R: Rng + ?Sized>(points: &[Rgb], k: usize, rng: &mut R) -> Vec<Rgb> {
    let local_trials = 2 + (k as f64).ln() as usize;

    let first = points[rng.gen_range(0..points.len())];
    let mut centroids = Vec::with_capacity(k);
    centroids.push(first);

    let mut closest: Vec<f64> = points.iter().map(|p| p.distance_squared(first)).collect();
    let mut potential: f64 = closest.iter().sum();

    while centroids.len() < k {
        let mut best_index = sample_weighted(&closest, potential, rng);
        let mut best_closest = tightened(points, &closest, points[best_index]);
        let mut best_potential: f64 = best_closest.iter().sum();

        for _ in 1..local_trials {
            let candidate = sample_weighted(&closest, potential, rng);
            let candidate_closest = tightened(points, &closest, points[candidate]);
            let candidate_potential: f64 = candidate_closest.iter().sum();
            if candidate_potential < best_potential {
                best_index = candidate;
                best_closest = candidate_closest;
                best_potential = candidate_potential;
            }
        }

        centroids.push(points[best_index]);
        closest = best_closest;
        potential = best_potential;
    }

    centroids
}

/// Squared distance of every point to its nearest centroid once `candidate`
/// joins the set.
fn tightened(points: &[Rgb], closest: &[f64], candidate: Rgb) -> Vec<f64> {
    points
        .iter()
        .zip(closest)
        .map(|(p, &d)| d.min(p.distance_squared(candidate)))
        .collect()
}

/// Draw an index with probability proportional to `weights[i]`.
///
/// Falls back to a uniform draw when every weight is zero (all points
/// already coincide with a centroid).
fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    if total <= 0.0 || !total.is_finite() {
        return rng.gen_range(0..weights.len());
    }

    let mut target = rng.gen::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        if target < w {
            return i;
        }
        target -= w;
    }

    // Float rounding can walk past the last bucket.
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_init_count_auto() {
        assert_eq!(InitCount::Auto.resolve(Init::KMeansPlusPlus), 1);
        assert_eq!(InitCount::Auto.resolve(Init::Random), 10);
        assert_eq!(InitCount::Fixed(3).resolve(Init::KMeansPlusPlus), 3);
    }

    #[test]
    fn test_sample_weighted_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        let weights = [0.0, 0.0, 5.0, 0.0];
        for _ in 0..100 {
            assert_eq!(sample_weighted(&weights, 5.0, &mut rng), 2);
        }
    }

    #[test]
    fn test_sample_weighted_all_zero_is_uniform_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let weights = [0.0; 5];
        for _ in 0..100 {
            assert!(sample_weighted(&weights, 0.0, &mut rng) < 5);
        }
    }

    #[test]
    fn test_kmeans_plus_plus_spreads_over_distinct_colors() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut points = vec![Rgb::from_bytes([0, 0, 0]); 50];
        points.extend(vec![Rgb::from_bytes([255, 255, 255]); 50]);

        let seeds = seed_centroids(Init::KMeansPlusPlus, &points, 2, &mut rng);
        assert_eq!(seeds.len(), 2);
        assert_ne!(seeds[0], seeds[1], "second seed must land on the other color");
    }

    #[test]
    fn test_kmeans_plus_plus_identical_points() {
        let mut rng = StdRng::seed_from_u64(4);
        let points = vec![Rgb::from_bytes([9, 9, 9]); 10];

        let seeds = seed_centroids(Init::KMeansPlusPlus, &points, 4, &mut rng);
        assert_eq!(seeds, vec![Rgb::from_bytes([9, 9, 9]); 4]);
    }

    #[test]
    fn test_random_seeding_picks_distinct_samples() {
        let mut rng = StdRng::seed_from_u64(5);
        let points: Vec<Rgb> = (0..20u8).map(|v| Rgb::from_bytes([v, v, v])).collect();

        let seeds = seed_centroids(Init::Random, &points, 5, &mut rng);
        assert_eq!(seeds.len(), 5);
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
