//! Black-Scholes closed-form valuation for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Preconditions
//!
//! Spot, strike, time to expiry and volatility must be strictly positive.
//! Nothing here checks them: zero time or volatility divides by zero and the
//! NaN or infinity propagates to the caller. Use
//! [`OptionContract::validate`](crate::OptionContract::validate) to reject such
//! inputs up front.

use optkit_core::math::distributions::{norm_cdf, norm_pdf};
use optkit_core::types::OptionType;

use crate::contract::OptionContract;
use crate::greeks::{Greeks, DAYS_PER_YEAR, PER_PERCENT_POINT};

/// Intermediate terms shared by price and Greeks.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    discount: f64,
}

impl Terms {
    #[inline]
    fn new(c: &OptionContract) -> Self {
        let sqrt_t = c.time_to_expiry.sqrt();
        let vol_sqrt_t = c.volatility * sqrt_t;

        let log_moneyness = (c.spot / c.strike).ln();
        let drift = (c.risk_free_rate + 0.5 * c.volatility * c.volatility) * c.time_to_expiry;

        let d1 = (log_moneyness + drift) / vol_sqrt_t;

        Self {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount: c.discount_factor(),
        }
    }
}

/// The d₁ term of the Black-Scholes formula.
#[inline]
pub fn d1(contract: &OptionContract) -> f64 {
    Terms::new(contract).d1
}

/// The d₂ term of the Black-Scholes formula (d₁ - σ√T).
#[inline]
pub fn d2(contract: &OptionContract) -> f64 {
    Terms::new(contract).d2
}

/// Theoretical price of a European option.
///
/// Deterministic for identical inputs.
///
/// # Examples
/// ```
/// use optkit_pricing::{price_option, OptionContract};
/// use optkit_core::types::OptionType;
///
/// let call = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call);
/// let put = call.with_option_type(OptionType::Put);
///
/// assert!((price_option(&call) - 10.4506).abs() < 0.01);
/// assert!((price_option(&put) - 5.5735).abs() < 0.01);
///
/// // Put-call parity: P - C = K·e^(-rT) - S
/// let parity = price_option(&put) - price_option(&call) - (100.0 * (-0.05_f64).exp() - 100.0);
/// assert!(parity.abs() < 1e-6);
/// ```
pub fn price_option(contract: &OptionContract) -> f64 {
    let t = Terms::new(contract);
    let spot = contract.spot;
    let strike = contract.strike;

    match contract.option_type {
        OptionType::Call => spot * norm_cdf(t.d1) - strike * t.discount * norm_cdf(t.d2),
        OptionType::Put => strike * t.discount * norm_cdf(-t.d2) - spot * norm_cdf(-t.d1),
    }
}

/// Analytical Greeks of a European option.
///
/// | Greek | Call | Put |
/// |---|---|---|
/// | delta | N(d₁) | N(d₁) − 1 |
/// | gamma | φ(d₁)/(S·σ·√T) | same |
/// | theta | −Sσφ(d₁)/(2√T) − rKe^(−rT)N(d₂) | −Sσφ(d₁)/(2√T) + rKe^(−rT)N(−d₂) |
/// | vega | S·φ(d₁)·√T | same |
/// | rho | K·T·e^(−rT)·N(d₂) | −K·T·e^(−rT)·N(−d₂) |
///
/// Theta is then divided by 365, vega and rho multiplied by 0.01
/// (see [`Greeks`]).
///
/// # Examples
/// ```
/// use optkit_pricing::{compute_greeks, OptionContract};
/// use optkit_core::types::OptionType;
///
/// let call = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call);
/// let g = compute_greeks(&call);
///
/// assert!((g.delta - 0.6368).abs() < 1e-4);
/// assert!((g.vega - 0.3752).abs() < 1e-4);
/// assert!(g.theta < 0.0);
/// ```
pub fn compute_greeks(contract: &OptionContract) -> Greeks {
    let t = Terms::new(contract);
    let spot = contract.spot;
    let strike = contract.strike;
    let vol = contract.volatility;
    let rate = contract.risk_free_rate;
    let expiry = contract.time_to_expiry;

    let n_d1 = norm_cdf(t.d1);
    let pdf_d1 = norm_pdf(t.d1);

    let gamma = pdf_d1 / (spot * vol * t.sqrt_t);
    let vega = spot * pdf_d1 * t.sqrt_t * PER_PERCENT_POINT;

    // Time decay from volatility, common to both directions
    let decay = -(spot * vol * pdf_d1) / (2.0 * t.sqrt_t);

    let (delta, annual_theta, rho) = match contract.option_type {
        OptionType::Call => {
            let n_d2 = norm_cdf(t.d2);
            (
                n_d1,
                decay - rate * strike * t.discount * n_d2,
                strike * expiry * t.discount * n_d2,
            )
        }
        OptionType::Put => {
            let n_neg_d2 = norm_cdf(-t.d2);
            (
                n_d1 - 1.0,
                decay + rate * strike * t.discount * n_neg_d2,
                -strike * expiry * t.discount * n_neg_d2,
            )
        }
    };

    Greeks {
        delta,
        gamma,
        theta: annual_theta / DAYS_PER_YEAR,
        vega,
        rho: rho * PER_PERCENT_POINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contract(strike: f64, expiry: f64, option_type: OptionType) -> OptionContract {
        OptionContract::new(100.0, strike, expiry, 0.2, 0.05, option_type)
    }

    fn atm(option_type: OptionType) -> OptionContract {
        contract(100.0, 1.0, option_type)
    }

    // ==========================================================
    // d1 / d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_atm() {
        // d1 = (0 + (0.05 + 0.02) * 1) / 0.2 = 0.35
        assert_relative_eq!(d1(&atm(OptionType::Call)), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_d2_atm() {
        assert_relative_eq!(d2(&atm(OptionType::Call)), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_sign_by_moneyness() {
        assert!(d1(&contract(80.0, 1.0, OptionType::Call)) > 0.0);
        assert!(d1(&contract(150.0, 1.0, OptionType::Call)) < 0.0);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        let price = price_option(&atm(OptionType::Call));
        assert_relative_eq!(price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_put_price_reference_value() {
        assert_relative_eq!(price_option(&atm(OptionType::Put)), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_put_call_parity_various_strikes() {
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = price_option(&contract(strike, 1.0, OptionType::Call));
            let put = price_option(&contract(strike, 1.0, OptionType::Put));
            let forward = strike * (-0.05_f64).exp() - 100.0;
            assert_relative_eq!(put - call, forward, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let call = atm(OptionType::Call).with_risk_free_rate(-0.02);
        let put = call.with_option_type(OptionType::Put);
        let forward = 100.0 * (0.02_f64).exp() - 100.0;
        let gap = price_option(&put) - price_option(&call);
        assert_relative_eq!(gap, forward, epsilon = 1e-6);
    }

    #[test]
    fn test_deep_itm_call_near_forward_intrinsic() {
        let price = price_option(&contract(30.0, 1.0, OptionType::Call));
        let forward_intrinsic = 100.0 - 30.0 * (-0.05_f64).exp();
        assert_relative_eq!(price, forward_intrinsic, epsilon = 1e-4);
    }

    #[test]
    fn test_deep_otm_call_near_zero() {
        let price = price_option(&contract(300.0, 0.25, OptionType::Call));
        assert!(price >= 0.0);
        assert!(price < 1e-6);
    }

    #[test]
    fn test_invalid_inputs_propagate_non_finite() {
        let zero_vol = atm(OptionType::Call)
            .with_volatility(0.0)
            .with_risk_free_rate(0.0);
        let zero_time = atm(OptionType::Put).with_time_to_expiry(0.0);
        // ATM with zero drift and σ√T = 0 gives 0/0 in d1
        assert!(price_option(&zero_vol).is_nan());
        assert!(!compute_greeks(&zero_time).is_finite());
    }

    // ==========================================================
    // Greeks Tests
    // ==========================================================

    #[test]
    fn test_call_greeks_reference_values() {
        let g = compute_greeks(&atm(OptionType::Call));
        assert_relative_eq!(g.delta, 0.636831, epsilon = 1e-5);
        assert_relative_eq!(g.gamma, 0.018762, epsilon = 1e-5);
        assert_relative_eq!(g.theta, -6.414028 / 365.0, epsilon = 1e-6);
        assert_relative_eq!(g.vega, 0.375240, epsilon = 1e-5);
        assert_relative_eq!(g.rho, 0.532325, epsilon = 1e-5);
    }

    #[test]
    fn test_put_greeks_reference_values() {
        let g = compute_greeks(&atm(OptionType::Put));
        assert_relative_eq!(g.delta, -0.363169, epsilon = 1e-5);
        assert_relative_eq!(g.gamma, 0.018762, epsilon = 1e-5);
        assert_relative_eq!(g.theta, -1.657880 / 365.0, epsilon = 1e-6);
        assert_relative_eq!(g.vega, 0.375240, epsilon = 1e-5);
        assert_relative_eq!(g.rho, -0.418905, epsilon = 1e-5);
    }

    #[test]
    fn test_delta_bounds() {
        for strike in [50.0, 80.0, 100.0, 120.0, 200.0] {
            let call = compute_greeks(&contract(strike, 1.0, OptionType::Call)).delta;
            let put = compute_greeks(&contract(strike, 1.0, OptionType::Put)).delta;
            assert!((0.0..=1.0).contains(&call), "Call delta {} out of range", call);
            assert!((-1.0..=0.0).contains(&put), "Put delta {} out of range", put);
            assert_relative_eq!(put, call - 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gamma_and_vega_direction_independent() {
        for strike in [80.0, 100.0, 120.0] {
            let call = compute_greeks(&contract(strike, 0.5, OptionType::Call));
            let put = compute_greeks(&contract(strike, 0.5, OptionType::Put));
            assert_eq!(call.gamma, put.gamma);
            assert_eq!(call.vega, put.vega);
            assert!(call.gamma >= 0.0);
            assert!(call.vega >= 0.0);
        }
    }

    #[test]
    fn test_rho_signs() {
        assert!(compute_greeks(&atm(OptionType::Call)).rho > 0.0);
        assert!(compute_greeks(&atm(OptionType::Put)).rho < 0.0);
    }

    // ==========================================================
    // Greeks vs Finite Difference Tests
    // ==========================================================

    #[test]
    fn test_delta_vs_finite_diff() {
        let c = atm(OptionType::Call);
        let h = 0.5;
        let fd = (price_option(&c.with_spot(100.0 + h)) - price_option(&c.with_spot(100.0 - h)))
            / (2.0 * h);
        assert_relative_eq!(compute_greeks(&c).delta, fd, epsilon = 1e-3);
    }

    #[test]
    fn test_gamma_vs_finite_diff() {
        let c = atm(OptionType::Put);
        let h = 1.0;
        let fd = (price_option(&c.with_spot(100.0 + h)) - 2.0 * price_option(&c)
            + price_option(&c.with_spot(100.0 - h)))
            / (h * h);
        assert_relative_eq!(compute_greeks(&c).gamma, fd, epsilon = 1e-4);
    }

    #[test]
    fn test_vega_vs_finite_diff_per_point() {
        let c = atm(OptionType::Call);
        // One vol point either side
        let fd = (price_option(&c.with_volatility(0.21)) - price_option(&c.with_volatility(0.19)))
            / 2.0;
        assert_relative_eq!(compute_greeks(&c).vega, fd, epsilon = 1e-3);
    }

    #[test]
    fn test_theta_vs_finite_diff_per_day() {
        let c = atm(OptionType::Put);
        let d = 1.0 / 365.0;
        // Theta is the change from one day passing, i.e. expiry shrinking
        let fd = price_option(&c.with_time_to_expiry(1.0 - d)) - price_option(&c);
        assert_relative_eq!(compute_greeks(&c).theta, fd, epsilon = 1e-4);
    }

    #[test]
    fn test_rho_vs_finite_diff_per_point() {
        let c = atm(OptionType::Put);
        let fd = (price_option(&c.with_risk_free_rate(0.06))
            - price_option(&c.with_risk_free_rate(0.04)))
            / 2.0;
        assert_relative_eq!(compute_greeks(&c).rho, fd, epsilon = 1e-3);
    }
}
