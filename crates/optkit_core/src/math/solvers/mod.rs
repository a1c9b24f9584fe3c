//! Root-finding solvers for numerical inversion.
//!
//! ## Available Solvers
//!
//! - [`BisectionSolver`]: Derivative-free bracketing method for monotone
//!   objectives, used for implied volatility
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `precision`: Residual threshold on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use optkit_core::math::solvers::{BisectionSolver, SolverConfig};
//!
//! // Solve e^x = 3 on [0, 2]
//! let solver = BisectionSolver::new(SolverConfig::new(1e-10, 100));
//! let result = solver.find_root(|x: f64| x.exp() - 3.0, 0.0, 2.0);
//!
//! assert!(result.converged);
//! assert!((result.root - 3.0_f64.ln()).abs() < 1e-9);
//! ```

mod bisection;
mod config;

pub use bisection::{BisectionResult, BisectionSolver};
pub use config::SolverConfig;
