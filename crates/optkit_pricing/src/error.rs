//! Error types for pricing operations.
//!
//! The closed-form functions themselves never return errors: invalid inputs
//! propagate as NaN or infinity. These errors come from the opt-in checks
//! (`OptionContract::validate`, `ImpliedVolSolver::solve_checked`) and from
//! helpers that build inputs (dates, price profiles).

use optkit_core::types::DateError;
use thiserror::Error;

/// Pricing errors.
///
/// # Examples
/// ```
/// use optkit_pricing::PricingError;
///
/// let err = PricingError::NonPositive { field: "volatility", value: 0.0 };
/// assert_eq!(format!("{}", err), "Invalid volatility: 0 (must be positive)");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// A contract field that must be strictly positive is not.
    #[error("Invalid {field}: {value} (must be positive)")]
    NonPositive {
        /// Name of the contract field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A contract field is NaN or infinite.
    #[error("Invalid {field}: {value} (must be finite)")]
    NonFinite {
        /// Name of the contract field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Market price cannot be matched by any volatility in the search bracket.
    #[error(
        "Market price {market_price} outside achievable range [{min_price}, {max_price}] \
         for volatility in [{lower_vol}, {upper_vol}]"
    )]
    PriceOutOfBracket {
        /// Observed price being inverted
        market_price: f64,
        /// Model price at the lower volatility bound
        min_price: f64,
        /// Model price at the upper volatility bound
        max_price: f64,
        /// Lower volatility bound
        lower_vol: f64,
        /// Upper volatility bound
        upper_vol: f64,
    },

    /// Implied-volatility bisection exhausted its iteration budget.
    #[error("Implied volatility did not converge after {iterations} iterations (last estimate {volatility})")]
    NotConverged {
        /// Iterations performed
        iterations: usize,
        /// Best available estimate
        volatility: f64,
    },

    /// Invalid price profile grid.
    #[error("Invalid price profile: {0}")]
    InvalidProfile(String),

    /// Invalid valuation or expiration date.
    #[error(transparent)]
    Date(#[from] DateError),
}
