//! # optkit_pricing (L2: Pricing Engine)
//!
//! Closed-form valuation of European options under Black-Scholes.
//!
//! This crate provides:
//! - `OptionContract`: the six valuation inputs, with an opt-in `validate`
//! - `price_option`: theoretical call/put value
//! - `compute_greeks`: delta, gamma, theta (per day), vega and rho (per 1%)
//! - `implied_volatility`: bisection inversion of a market price
//! - `profile`: value across a grid of spot prices
//! - `batch`: parallel pricing of contract slices
//!
//! ## Design Principles
//!
//! - **Pure functions**: no state, no I/O; identical inputs give identical outputs
//! - **No clamping**: invalid inputs surface as NaN/Infinity, never a panic
//! - **Opt-in strictness**: checked variants return `PricingError`
//!
//! ## Usage
//!
//! ```rust
//! use optkit_pricing::{compute_greeks, implied_volatility, price_option, OptionContract};
//! use optkit_core::types::OptionType;
//!
//! let call = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call);
//!
//! let price = price_option(&call);
//! let greeks = compute_greeks(&call);
//! let vol = implied_volatility(price, 100.0, 100.0, 1.0, 0.05, OptionType::Call);
//!
//! assert!((price - 10.4506).abs() < 0.01);
//! assert!(greeks.delta > 0.5);
//! assert!((vol - 0.2).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod batch;
pub mod black_scholes;
pub mod contract;
pub mod error;
pub mod greeks;
pub mod implied_vol;
pub mod profile;

pub use black_scholes::{compute_greeks, d1, d2, price_option};
pub use contract::OptionContract;
pub use error::PricingError;
pub use greeks::Greeks;
pub use implied_vol::{
    implied_volatility, implied_volatility_with, ImpliedVolConfig, ImpliedVolResult,
    ImpliedVolSolver,
};
pub use profile::{price_profile, ProfilePoint, ProfileSpec};
