//! Stopping rules shared by the solvers.

use num_traits::Float;

/// When a root finder stops.
///
/// A run ends at the first point with `|f(x)| < precision`, or after
/// `max_iterations` objective evaluations. A zero budget is allowed: the
/// solver then reports its starting estimate without evaluating `f`.
///
/// ```
/// use optkit_core::math::solvers::SolverConfig;
///
/// let quote_level = SolverConfig::new(1e-4, 100);
/// assert!(quote_level.precision > SolverConfig::<f64>::default().precision);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Residual threshold for success.
    pub precision: T,

    /// Objective evaluation budget.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// `precision = 1e-10`, `max_iterations = 100`.
    fn default() -> Self {
        Self::new(T::from(1e-10).unwrap(), 100)
    }
}

impl<T: Float> SolverConfig<T> {
    /// Stopping rule with the given precision and budget.
    pub fn new(precision: T, max_iterations: usize) -> Self {
        Self {
            precision,
            max_iterations,
        }
    }

    /// Same budget, different precision.
    pub fn with_precision(self, precision: T) -> Self {
        Self { precision, ..self }
    }

    /// Same precision, different budget.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// True when the budget allows at least one evaluation and the
    /// precision is a positive finite number.
    pub fn is_usable(&self) -> bool {
        self.max_iterations > 0 && self.precision > T::zero() && self.precision.is_finite()
    }
}
