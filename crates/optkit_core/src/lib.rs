//! # optkit_core: Numerical Foundation for the Options Analytics Toolkit
//!
//! ## Layer 1 (Foundation) Role
//!
//! optkit_core is the bottom layer of the workspace, providing:
//! - Standard normal distribution functions (`math::distributions`)
//! - Bracketing root finders (`math::solvers`)
//! - Option direction: `OptionType` (`types::option_type`)
//! - Day count conventions and time to expiry (`types::time`)
//! - Error types: `SolverError`, `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other optkit_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use optkit_core::math::distributions::norm_cdf;
//! use optkit_core::types::{DayCountConvention, OptionType};
//! use chrono::NaiveDate;
//!
//! // Φ(0) = 0.5
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//!
//! // Time to expiry from an expiration date
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let t = DayCountConvention::ActualActual365.year_fraction(today, expiry);
//! assert!((t - 0.4986).abs() < 0.001);
//!
//! let call: OptionType = "call".parse().unwrap();
//! assert!(call.is_call());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionType`, `DayCountConvention`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
