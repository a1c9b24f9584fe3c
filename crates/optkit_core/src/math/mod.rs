//! Mathematical building blocks shared by the pricing and clustering engines.
//!
//! - [`distributions`]: Standard normal CDF and PDF
//! - [`solvers`]: Bracketing root finders

pub mod distributions;
pub mod solvers;
