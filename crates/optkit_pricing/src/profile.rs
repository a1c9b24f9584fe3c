//! Option value across a grid of underlying prices.

use crate::black_scholes::price_option;
use crate::contract::OptionContract;
use crate::error::PricingError;

/// Spot grid expressed relative to the contract's spot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileSpec {
    /// First grid point as a multiple of spot.
    pub lower: f64,
    /// Last grid point as a multiple of spot.
    pub upper: f64,
    /// Number of equal intervals; the grid has `steps + 1` points.
    pub steps: usize,
}

impl Default for ProfileSpec {
    /// 70% to 130% of spot in 20 steps.
    fn default() -> Self {
        Self {
            lower: 0.7,
            upper: 1.3,
            steps: 20,
        }
    }
}

impl ProfileSpec {
    fn validate(&self) -> Result<(), PricingError> {
        if self.steps == 0 {
            return Err(PricingError::InvalidProfile("steps must be > 0".to_string()));
        }
        if !(self.lower.is_finite() && self.upper.is_finite()) || self.lower <= 0.0 {
            return Err(PricingError::InvalidProfile(format!(
                "bounds must be finite and positive, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.upper <= self.lower {
            return Err(PricingError::InvalidProfile(format!(
                "upper bound {} must exceed lower bound {}",
                self.upper, self.lower
            )));
        }
        Ok(())
    }
}

/// One grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfilePoint {
    /// Underlying price.
    pub spot: f64,
    /// Model value at this spot.
    pub price: f64,
    /// Exercise value at this spot.
    pub intrinsic: f64,
}

/// Prices `contract` at `spec.steps + 1` evenly spaced spots.
///
/// All other contract fields are held fixed.
///
/// # Errors
/// `PricingError::InvalidProfile` for a zero step count or a bound ordering
/// that does not describe a positive interval.
///
/// # Examples
/// ```
/// use optkit_pricing::profile::{price_profile, ProfileSpec};
/// use optkit_pricing::OptionContract;
/// use optkit_core::types::OptionType;
///
/// let contract = OptionContract::new(100.0, 100.0, 0.5, 0.2, 0.05, OptionType::Call);
/// let points = price_profile(&contract, &ProfileSpec::default()).unwrap();
///
/// assert_eq!(points.len(), 21);
/// assert!((points[0].spot - 70.0).abs() < 1e-9);
/// assert!((points[20].spot - 130.0).abs() < 1e-9);
/// ```
pub fn price_profile(
    contract: &OptionContract,
    spec: &ProfileSpec,
) -> Result<Vec<ProfilePoint>, PricingError> {
    spec.validate()?;

    let start = contract.spot * spec.lower;
    let step = contract.spot * (spec.upper - spec.lower) / spec.steps as f64;

    let points = (0..=spec.steps)
        .map(|i| {
            let shifted = contract.with_spot(start + step * i as f64);
            ProfilePoint {
                spot: shifted.spot,
                price: price_option(&shifted),
                intrinsic: shifted.intrinsic_value(),
            }
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optkit_core::types::OptionType;

    fn call() -> OptionContract {
        OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call)
    }

    #[test]
    fn test_default_grid() {
        let points = price_profile(&call(), &ProfileSpec::default()).unwrap();
        assert_eq!(points.len(), 21);
        for (i, p) in points.iter().enumerate() {
            assert_relative_eq!(p.spot, 70.0 + 3.0 * i as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_centre_point_matches_direct_price() {
        let points = price_profile(&call(), &ProfileSpec::default()).unwrap();
        assert_relative_eq!(points[10].price, price_option(&call()), epsilon = 1e-9);
    }

    #[test]
    fn test_call_profile_increasing_and_above_intrinsic() {
        let points = price_profile(&call(), &ProfileSpec::default()).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].price > pair[0].price);
        }
        for p in &points {
            assert!(p.price >= p.intrinsic);
        }
    }

    #[test]
    fn test_put_profile_decreasing() {
        let put = call().with_option_type(OptionType::Put);
        let points = price_profile(&put, &ProfileSpec::default()).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].price < pair[0].price);
        }
        assert_relative_eq!(points[0].intrinsic, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_grid() {
        let spec = ProfileSpec {
            lower: 0.5,
            upper: 1.5,
            steps: 4,
        };
        let spots: Vec<f64> = price_profile(&call(), &spec)
            .unwrap()
            .iter()
            .map(|p| p.spot)
            .collect();
        assert_eq!(spots, vec![50.0, 75.0, 100.0, 125.0, 150.0]);
    }

    #[test]
    fn test_invalid_specs() {
        let bad = [
            ProfileSpec {
                steps: 0,
                ..ProfileSpec::default()
            },
            ProfileSpec {
                lower: 1.3,
                upper: 0.7,
                steps: 20,
            },
            ProfileSpec {
                lower: 0.0,
                ..ProfileSpec::default()
            },
            ProfileSpec {
                upper: f64::NAN,
                ..ProfileSpec::default()
            },
        ];
        for spec in bad {
            assert!(matches!(
                price_profile(&call(), &spec),
                Err(PricingError::InvalidProfile(_))
            ));
        }
    }
}
