//! CLI error types

use optkit_clustering::ClusteringError;
use optkit_core::types::DateError;
use optkit_pricing::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pricing error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Clustering error
    #[error("Clustering error: {0}")]
    Clustering(#[from] ClusteringError),

    /// Date error
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pricing_error() {
        let err: CliError = PricingError::NonPositive {
            field: "spot",
            value: -1.0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Pricing error: Invalid spot: -1 (must be positive)"
        );
    }

    #[test]
    fn test_from_clustering_error() {
        let err: CliError = ClusteringError::InsufficientData {
            points: 2,
            clusters: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Clustering error: Insufficient data: 2 points for 3 clusters"
        );
    }
}
