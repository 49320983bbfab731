//! Error type for clustering.

use std::fmt;

/// Error returned when clustering cannot run on the given input.
///
/// # Example
///
/// ```
/// use dominant_color::{ClusterError, KMeans, Rgb};
///
/// let pixels = vec![Rgb::from_bytes([1, 2, 3])];
/// let err = KMeans::new(4).fit(&pixels).unwrap_err();
/// assert_eq!(err, ClusterError::TooFewSamples { samples: 1, clusters: 4 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Zero clusters were requested
    NoClusters,
    /// Fewer samples than clusters
    TooFewSamples {
        /// Number of samples provided
        samples: usize,
        /// Number of clusters requested
        clusters: usize,
    },
    /// A sample has a NaN or infinite channel
    NonFiniteSample {
        /// Index of the first offending sample
        index: usize,
    },
    /// A tuning parameter is out of range
    InvalidParameter(&'static str),
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterError::NoClusters => write!(f, "cluster count must be at least 1"),
            ClusterError::TooFewSamples { samples, clusters } => write!(
                f,
                "{} samples is fewer than the {} requested clusters",
                samples, clusters
            ),
            ClusterError::NonFiniteSample { index } => {
                write!(f, "sample {} has a non-finite channel value", index)
            }
            ClusterError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for ClusterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ClusterError::NoClusters.to_string(),
            "cluster count must be at least 1"
        );
        assert_eq!(
            ClusterError::TooFewSamples {
                samples: 3,
                clusters: 4
            }
            .to_string(),
            "3 samples is fewer than the 4 requested clusters"
        );
        assert_eq!(
            ClusterError::NonFiniteSample { index: 9 }.to_string(),
            "sample 9 has a non-finite channel value"
        );
        assert_eq!(
            ClusterError::InvalidParameter("max_iterations must be at least 1").to_string(),
            "invalid parameter: max_iterations must be at least 1"
        );
    }
}
