//! Option contract parameter set.

use chrono::NaiveDate;
use optkit_core::types::{time_to_expiry_with, DayCountConvention, OptionType};

use crate::error::PricingError;

/// Inputs to a European option valuation.
///
/// Spot, strike, time to expiry and volatility must be strictly positive for
/// the Black-Scholes formula to be defined. The pricing functions do not
/// check this; call [`OptionContract::validate`] first when the values come
/// from user input.
///
/// # Examples
/// ```
/// use optkit_pricing::{price_option, OptionContract};
/// use optkit_core::types::OptionType;
///
/// let contract = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call);
/// assert!(contract.validate().is_ok());
/// assert!((price_option(&contract) - 10.4506).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    /// Underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Annualised volatility as a decimal fraction (σ)
    pub volatility: f64,
    /// Annualised continuously compounded risk-free rate (r); may be zero or negative
    pub risk_free_rate: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl OptionContract {
    /// Creates a contract from its six parameters.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            volatility,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates a contract whose time to expiry is derived from dates (ACT/365).
    ///
    /// # Errors
    /// `PricingError::Date` when `expiration` is not after `valuation`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use optkit_pricing::OptionContract;
    /// use optkit_core::types::OptionType;
    ///
    /// let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let expiration = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    /// let contract = OptionContract::from_dates(
    ///     100.0, 105.0, valuation, expiration, 0.25, 0.03, OptionType::Put,
    /// ).unwrap();
    /// assert!((contract.time_to_expiry - 365.0 / 365.0).abs() < 1e-12);
    /// ```
    pub fn from_dates(
        spot: f64,
        strike: f64,
        valuation: NaiveDate,
        expiration: NaiveDate,
        volatility: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        let time_to_expiry =
            time_to_expiry_with(DayCountConvention::ActualActual365, valuation, expiration)?;
        Ok(Self::new(
            spot,
            strike,
            time_to_expiry,
            volatility,
            risk_free_rate,
            option_type,
        ))
    }

    /// Returns a copy with a different volatility.
    #[inline]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Returns a copy with a different spot.
    #[inline]
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Returns a copy with a different option type.
    #[inline]
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Returns a copy with a different time to expiry.
    #[inline]
    pub fn with_time_to_expiry(mut self, time_to_expiry: f64) -> Self {
        self.time_to_expiry = time_to_expiry;
        self
    }

    /// Returns a copy with a different risk-free rate.
    #[inline]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Payoff if exercised at the current spot.
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }

    /// Checks the preconditions of the closed-form formulas.
    ///
    /// # Errors
    /// - `PricingError::NonFinite` if any numeric field is NaN or infinite
    /// - `PricingError::NonPositive` if spot, strike, time to expiry or
    ///   volatility is zero or negative
    ///
    /// # Examples
    /// ```
    /// use optkit_pricing::{OptionContract, PricingError};
    /// use optkit_core::types::OptionType;
    ///
    /// let contract = OptionContract::new(100.0, 100.0, 0.0, 0.2, 0.05, OptionType::Call);
    /// assert_eq!(
    ///     contract.validate(),
    ///     Err(PricingError::NonPositive { field: "time_to_expiry", value: 0.0 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), PricingError> {
        let positive = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("time_to_expiry", self.time_to_expiry),
            ("volatility", self.volatility),
        ];

        for (field, value) in positive {
            if !value.is_finite() {
                return Err(PricingError::NonFinite { field, value });
            }
            if value <= 0.0 {
                return Err(PricingError::NonPositive { field, value });
            }
        }

        if !self.risk_free_rate.is_finite() {
            return Err(PricingError::NonFinite {
                field: "risk_free_rate",
                value: self.risk_free_rate,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> OptionContract {
        OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call)
    }

    // ==========================================================
    // Validation Tests
    // ==========================================================

    #[test]
    fn test_validate_accepts_textbook_contract() {
        assert!(atm_call().validate().is_ok());
    }

    #[test]
    fn test_validate_allows_zero_and_negative_rate() {
        assert!(atm_call().with_risk_free_rate(0.0).validate().is_ok());
        assert!(atm_call().with_risk_free_rate(-0.01).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_fields() {
        let cases = [
            (atm_call().with_spot(0.0), "spot"),
            (
                OptionContract {
                    strike: -5.0,
                    ..atm_call()
                },
                "strike",
            ),
            (atm_call().with_time_to_expiry(-1.0), "time_to_expiry"),
            (atm_call().with_volatility(0.0), "volatility"),
        ];
        for (contract, expected) in cases {
            match contract.validate() {
                Err(PricingError::NonPositive { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected NonPositive for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        match atm_call().with_volatility(f64::NAN).validate() {
            Err(PricingError::NonFinite { field, .. }) => assert_eq!(field, "volatility"),
            other => panic!("Expected NonFinite, got {:?}", other),
        }
        match atm_call().with_risk_free_rate(f64::INFINITY).validate() {
            Err(PricingError::NonFinite { field, .. }) => assert_eq!(field, "risk_free_rate"),
            other => panic!("Expected NonFinite, got {:?}", other),
        }
    }

    // ==========================================================
    // Construction Tests
    // ==========================================================

    #[test]
    fn test_from_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let call = OptionType::Call;
        let result = OptionContract::from_dates(100.0, 100.0, start, end, 0.2, 0.05, call);
        let contract = result.unwrap();
        assert!((contract.time_to_expiry - 182.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_dates_rejects_expired() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let put = OptionType::Put;
        let result = OptionContract::from_dates(100.0, 100.0, start, end, 0.2, 0.05, put);
        assert!(matches!(result, Err(PricingError::Date(_))));
    }

    #[test]
    fn test_discount_and_intrinsic() {
        let contract = atm_call().with_spot(110.0);
        assert!((contract.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
        assert_eq!(contract.intrinsic_value(), 10.0);
        assert_eq!(contract.with_option_type(OptionType::Put).intrinsic_value(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let contract = atm_call().with_option_type(OptionType::Put);
        let json = serde_json::to_string(&contract).unwrap();
        assert!(json.contains("\"option_type\":\"put\""));
        let parsed: OptionContract = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, contract);
    }
}
