//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding solvers
//! - `DateError`: Errors from date parsing and ordering
//! - `ParseOptionTypeError`: Unknown option direction strings

use thiserror::Error;

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use optkit_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// The objective has no sign change over the bracket.
    #[error("No bracket: no root of a non-decreasing objective in [{a}, {b}]")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use optkit_core::types::DateError;
///
/// let err = DateError::ParseError("2024-13-01".to_string());
/// assert_eq!(format!("{}", err), "Date parse error: 2024-13-01");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Failed to parse an ISO 8601 date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Expiration falls on or before the valuation date.
    #[error("Expiration {expiration} is not after valuation date {valuation}")]
    NotAfterValuation {
        /// Valuation date (ISO 8601)
        valuation: String,
        /// Expiration date (ISO 8601)
        expiration: String,
    },
}

/// Error returned when parsing an unknown option direction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown option type: {0}. Expected 'call' or 'put'")]
pub struct ParseOptionTypeError(pub String);
