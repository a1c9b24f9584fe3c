//! Implied volatility by bisection.
//!
//! Black-Scholes prices are strictly increasing in volatility (vega > 0), so
//! the price error `price(σ) - market_price` is a non-decreasing objective and
//! bisection over a fixed volatility bracket always narrows towards the
//! matching σ. When the market price is outside what the bracket can produce
//! the midpoints drift to the nearer bound.

use optkit_core::math::solvers::{BisectionSolver, SolverConfig};
use optkit_core::types::OptionType;
use tracing::debug;

use crate::black_scholes::price_option;
use crate::contract::OptionContract;
use crate::error::PricingError;

/// Lowest volatility searched.
pub const VOL_LOWER_BOUND: f64 = 0.001;

/// Highest volatility searched (500%).
pub const VOL_UPPER_BOUND: f64 = 5.0;

/// Default price precision.
pub const DEFAULT_PRECISION: f64 = 1e-4;

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Implied volatility search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Stop when `|price(σ) - market_price| < precision`.
    pub precision: f64,
    /// Maximum number of midpoints evaluated.
    pub max_iterations: usize,
    /// Lower volatility bound.
    pub lower: f64,
    /// Upper volatility bound.
    pub upper: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower: VOL_LOWER_BOUND,
            upper: VOL_UPPER_BOUND,
        }
    }
}

/// Implied volatility with convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolResult {
    /// Volatility estimate (last midpoint).
    pub volatility: f64,
    /// Midpoints evaluated.
    pub iterations: usize,
    /// Whether the precision target was met.
    pub converged: bool,
}

/// Bisection implied-volatility solver.
///
/// # Examples
/// ```
/// use optkit_pricing::{price_option, ImpliedVolSolver, OptionContract};
/// use optkit_core::types::OptionType;
///
/// let contract = OptionContract::new(100.0, 105.0, 0.5, 0.3, 0.02, OptionType::Call);
/// let market = price_option(&contract);
///
/// let result = ImpliedVolSolver::with_defaults().solve_detailed(&contract, market);
/// assert!(result.converged);
/// assert!((result.volatility - 0.3).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolSolver {
    /// Creates a solver with the given search parameters.
    pub fn new(config: ImpliedVolConfig) -> Self {
        Self { config }
    }

    /// Creates a solver with precision 1e-4, 100 iterations and bracket [0.001, 5.0].
    pub fn with_defaults() -> Self {
        Self::new(ImpliedVolConfig::default())
    }

    /// Returns the search parameters.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    fn bisection(&self) -> BisectionSolver<f64> {
        BisectionSolver::new(SolverConfig::new(self.config.precision, self.config.max_iterations))
    }

    /// Volatility that reprices `contract` to `market_price`.
    ///
    /// The contract's own volatility is ignored. Never fails: without
    /// convergence the last midpoint is returned.
    pub fn solve(&self, contract: &OptionContract, market_price: f64) -> f64 {
        self.solve_detailed(contract, market_price).volatility
    }

    /// Like [`solve`](Self::solve), also reporting iterations and convergence.
    pub fn solve_detailed(&self, contract: &OptionContract, market_price: f64) -> ImpliedVolResult {
        let objective = |vol: f64| price_option(&contract.with_volatility(vol)) - market_price;
        let result = self
            .bisection()
            .find_root(objective, self.config.lower, self.config.upper);

        if !result.converged {
            debug!(
                market_price,
                iterations = result.iterations,
                volatility = result.root,
                residual = result.residual,
                "implied volatility did not reach precision"
            );
        }

        ImpliedVolResult {
            volatility: result.root,
            iterations: result.iterations,
            converged: result.converged,
        }
    }

    /// Like [`solve`](Self::solve), failing instead of approximating.
    ///
    /// # Errors
    /// - `PricingError::PriceOutOfBracket` when `market_price` lies more than
    ///   `precision` outside the prices at the two volatility bounds
    /// - `PricingError::NotConverged` when the iteration budget runs out
    ///
    /// # Examples
    /// ```
    /// use optkit_pricing::{ImpliedVolSolver, OptionContract, PricingError};
    /// use optkit_core::types::OptionType;
    ///
    /// let contract = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call);
    /// // A call can never be worth more than the underlying
    /// let err = ImpliedVolSolver::with_defaults().solve_checked(&contract, 150.0).unwrap_err();
    /// assert!(matches!(err, PricingError::PriceOutOfBracket { .. }));
    /// ```
    pub fn solve_checked(
        &self,
        contract: &OptionContract,
        market_price: f64,
    ) -> Result<f64, PricingError> {
        let min_price = price_option(&contract.with_volatility(self.config.lower));
        let max_price = price_option(&contract.with_volatility(self.config.upper));
        let precision = self.config.precision;

        let reachable =
            market_price >= min_price - precision && market_price <= max_price + precision;
        if !reachable {
            return Err(PricingError::PriceOutOfBracket {
                market_price,
                min_price,
                max_price,
                lower_vol: self.config.lower,
                upper_vol: self.config.upper,
            });
        }

        let result = self.solve_detailed(contract, market_price);
        if result.converged {
            Ok(result.volatility)
        } else {
            Err(PricingError::NotConverged {
                iterations: result.iterations,
                volatility: result.volatility,
            })
        }
    }
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Implied volatility with the default search (precision 1e-4, 100 iterations).
///
/// See [`implied_volatility_with`] to choose the precision and budget per call.
///
/// # Examples
/// ```
/// use optkit_pricing::implied_volatility;
/// use optkit_core::types::OptionType;
///
/// let vol = implied_volatility(10.4506, 100.0, 100.0, 1.0, 0.05, OptionType::Call);
/// assert!((vol - 0.2).abs() < 1e-3);
/// ```
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    option_type: OptionType,
) -> f64 {
    implied_volatility_with(
        market_price,
        spot,
        strike,
        time_to_expiry,
        risk_free_rate,
        option_type,
        DEFAULT_PRECISION,
        DEFAULT_MAX_ITERATIONS,
    )
}

/// Implied volatility on the default bracket with an explicit stopping rule.
///
/// ```
/// use optkit_pricing::implied_volatility_with;
/// use optkit_core::types::OptionType;
///
/// let vol = implied_volatility_with(10.4506, 100.0, 100.0, 1.0, 0.05, OptionType::Call, 1e-8, 200);
/// assert!((vol - 0.2).abs() < 1e-4);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility_with(
    market_price: f64,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    option_type: OptionType,
    precision: f64,
    max_iterations: usize,
) -> f64 {
    let contract = OptionContract::new(
        spot,
        strike,
        time_to_expiry,
        VOL_LOWER_BOUND,
        risk_free_rate,
        option_type,
    );
    let config = ImpliedVolConfig {
        precision,
        max_iterations,
        ..ImpliedVolConfig::default()
    };
    ImpliedVolSolver::new(config).solve(&contract, market_price)
}
