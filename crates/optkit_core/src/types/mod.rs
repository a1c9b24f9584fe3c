//! Core domain and error types.
//!
//! This module provides:
//! - `option_type`: Call/put direction
//! - `time`: Day count conventions and time to expiry
//! - `error`: Structured error types for solver, date and parsing failures
//!
//! # Re-exports
//!
//! - [`OptionType`] from `option_type`
//! - [`DayCountConvention`], [`time_to_expiry`], [`parse_date`] from `time`
//! - [`SolverError`], [`DateError`], [`ParseOptionTypeError`] from `error`

pub mod error;
pub mod option_type;
pub mod time;

pub use error::{DateError, ParseOptionTypeError, SolverError};
pub use option_type::OptionType;
pub use time::{parse_date, time_to_expiry, time_to_expiry_with, DayCountConvention};
