//! Error types for clustering operations.

use thiserror::Error;

/// Clustering errors.
///
/// All variants are raised before any iteration starts.
///
/// # Examples
/// ```
/// use optkit_clustering::ClusteringError;
///
/// let err = ClusteringError::InsufficientData { points: 2, clusters: 3 };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient data: 2 points for 3 clusters"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClusteringError {
    /// Fewer points than requested clusters.
    #[error("Insufficient data: {points} points for {clusters} clusters")]
    InsufficientData {
        /// Number of points supplied
        points: usize,
        /// Number of clusters requested
        clusters: usize,
    },

    /// A configuration value outside its domain.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = ClusteringError::InvalidParameter {
            name: "k",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(format!("{}", err), "Invalid parameter k: must be at least 1");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ClusteringError::InsufficientData {
            points: 0,
            clusters: 1,
        };
        let _: &dyn std::error::Error = &err;
    }
}
