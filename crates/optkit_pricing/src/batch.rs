//! Parallel valuation of many contracts.
//!
//! Each contract is priced independently, so slices are split across the
//! rayon thread pool. Output order always matches input order and every value
//! is bit-identical to calling [`price_option`] or [`compute_greeks`] directly.
//!
//! # Example
//!
//! ```rust
//! use optkit_pricing::batch::{greeks_batch, price_batch};
//! use optkit_pricing::OptionContract;
//! use optkit_core::types::OptionType;
//!
//! let contracts: Vec<OptionContract> = (80..=120)
//!     .step_by(10)
//!     .map(|k| OptionContract::new(100.0, k as f64, 1.0, 0.2, 0.05, OptionType::Call))
//!     .collect();
//!
//! let prices = price_batch(&contracts);
//! let greeks = greeks_batch(&contracts);
//! assert_eq!(prices.len(), 5);
//! assert!(greeks.iter().all(|g| g.gamma >= 0.0));
//! ```

use rayon::prelude::*;

use crate::black_scholes::{compute_greeks, price_option};
use crate::contract::OptionContract;
use crate::greeks::Greeks;

/// Below this many contracts the batch runs on the calling thread.
pub const MIN_PARALLEL_BATCH: usize = 64;

/// Prices every contract.
pub fn price_batch(contracts: &[OptionContract]) -> Vec<f64> {
    if contracts.len() < MIN_PARALLEL_BATCH {
        return contracts.iter().map(price_option).collect();
    }
    contracts.par_iter().map(price_option).collect()
}

/// Greeks for every contract.
pub fn greeks_batch(contracts: &[OptionContract]) -> Vec<Greeks> {
    if contracts.len() < MIN_PARALLEL_BATCH {
        return contracts.iter().map(compute_greeks).collect();
    }
    contracts.par_iter().map(compute_greeks).collect()
}

/// Aggregate Greeks of a position list of `(contract, quantity)` pairs.
///
/// Negative quantities are short positions.
pub fn position_greeks(positions: &[(OptionContract, f64)]) -> Greeks {
    positions
        .par_iter()
        .fold(Greeks::default, |acc, (contract, quantity)| {
            acc + compute_greeks(contract).scaled(*quantity)
        })
        .reduce(Greeks::default, |a, b| a + b)
}
