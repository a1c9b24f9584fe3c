//! Bisection root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Outcome of a bisection run.
///
/// Bisection never fails on its own: when the iteration budget runs out the
/// last midpoint is still the best available estimate, so it is returned with
/// `converged == false` and the caller decides whether it is acceptable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionResult<T: Float> {
    /// Last midpoint evaluated.
    pub root: T,
    /// `f(root)`.
    pub residual: T,
    /// Number of objective evaluations performed.
    pub iterations: usize,
    /// Whether `|f(root)| < precision` was reached.
    pub converged: bool,
}

/// Bisection root finder for non-decreasing objectives.
///
/// Repeatedly halves `[low, high]`: the midpoint becomes the new `high` when
/// `f(mid) > 0` and the new `low` otherwise. No derivative is needed, and for
/// a monotone objective the bracket always keeps the root, so convergence is
/// guaranteed within `log2((high - low) / precision_x)` steps.
///
/// # Example
///
/// ```
/// use optkit_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::new(1e-10, 200));
///
/// // Solve x² - 2 = 0 on [0, 2]
/// let result = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0);
/// assert!(result.converged);
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Bisect `f` on `[low, high]`.
    ///
    /// `f` is assumed non-decreasing on the bracket. The bracket is not
    /// checked: if the root lies outside it the midpoints converge to the
    /// nearer endpoint and the result reports `converged == false`.
    ///
    /// With `max_iterations == 0` the initial midpoint is returned
    /// unevaluated (`residual` is NaN).
    pub fn find_root<F>(&self, f: F, low: T, high: T) -> BisectionResult<T>
    where
        F: Fn(T) -> T,
    {
        let two = T::from(2.0).unwrap();
        let mut low = low;
        let mut high = high;
        let mut mid = (low + high) / two;
        let mut residual = T::nan();

        for iteration in 0..self.config.max_iterations {
            mid = (low + high) / two;
            residual = f(mid);

            if residual.abs() < self.config.precision {
                return BisectionResult {
                    root: mid,
                    residual,
                    iterations: iteration + 1,
                    converged: true,
                };
            }

            if residual > T::zero() {
                high = mid;
            } else {
                low = mid;
            }
        }

        BisectionResult {
            root: mid,
            residual,
            iterations: self.config.max_iterations,
            converged: false,
        }
    }

    /// Bisect `f` on `[low, high]`, failing instead of approximating.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(low) > 0` or `f(high) < 0`, so a
    ///   non-decreasing `f` has no root in the bracket
    /// * `SolverError::MaxIterationsExceeded` - precision not reached
    ///
    /// # Example
    ///
    /// ```
    /// use optkit_core::math::solvers::BisectionSolver;
    /// use optkit_core::types::SolverError;
    ///
    /// let solver: BisectionSolver<f64> = BisectionSolver::with_defaults();
    /// let err = solver.find_root_checked(|x| x - 10.0, 0.0, 5.0).unwrap_err();
    /// assert!(matches!(err, SolverError::NoBracket { .. }));
    /// ```
    pub fn find_root_checked<F>(&self, f: F, low: T, high: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let f_low = f(low);
        let f_high = f(high);

        if f_low > T::zero() || f_high < T::zero() || f_low.is_nan() || f_high.is_nan() {
            return Err(SolverError::NoBracket {
                a: low.to_f64().unwrap_or(f64::NAN),
                b: high.to_f64().unwrap_or(f64::NAN),
            });
        }

        let result = self.find_root(f, low, high);
        if result.converged {
            Ok(result.root)
        } else {
            Err(SolverError::MaxIterationsExceeded {
                iterations: result.iterations,
            })
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
