//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod cluster;
pub mod greeks;
pub mod implied_vol;
pub mod price;
pub mod profile;

use chrono::{Local, NaiveDate};
use clap::Args;
use optkit_core::types::{parse_date, time_to_expiry_with, OptionType};
use optkit_pricing::OptionContract;
use tracing::debug;

use crate::config::PricingConfig;
use crate::{CliError, Result};

/// Contract inputs shared by the pricing commands (everything but volatility)
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Underlying price
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long, conflicts_with = "expiration", required_unless_present = "expiration")]
    pub expiry: Option<f64>,

    /// Expiration date (YYYY-MM-DD), instead of --expiry
    #[arg(long)]
    pub expiration: Option<String>,

    /// Valuation date (YYYY-MM-DD) for --expiration; defaults to today
    #[arg(long, requires = "expiration")]
    pub valuation: Option<String>,

    /// Risk-free rate as a decimal; defaults to pricing.risk_free_rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Option type (call or put)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,
}

impl ContractArgs {
    /// Years to expiry, from --expiry or from the dates.
    fn years(&self, config: &PricingConfig, today: NaiveDate) -> Result<f64> {
        match (self.expiry, &self.expiration) {
            (Some(years), _) => Ok(years),
            (None, Some(expiration)) => {
                let expiration = parse_date(expiration)?;
                let valuation = match &self.valuation {
                    Some(s) => parse_date(s)?,
                    None => today,
                };
                let years = time_to_expiry_with(config.day_count, valuation, expiration)?;
                debug!(
                    %valuation,
                    %expiration,
                    day_count = %config.day_count,
                    years,
                    "derived time to expiry"
                );
                Ok(years)
            }
            (None, None) => Err(CliError::InvalidArgument(
                "one of --expiry or --expiration is required".to_string(),
            )),
        }
    }

    /// Builds and validates the contract with the given volatility.
    pub fn contract(&self, volatility: f64, config: &PricingConfig) -> Result<OptionContract> {
        self.contract_as_of(volatility, config, Local::now().date_naive())
    }

    fn contract_as_of(
        &self,
        volatility: f64,
        config: &PricingConfig,
        today: NaiveDate,
    ) -> Result<OptionContract> {
        let contract = OptionContract::new(
            self.spot,
            self.strike,
            self.years(config, today)?,
            volatility,
            self.rate.unwrap_or(config.risk_free_rate),
            self.option_type,
        );
        contract.validate()?;
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optkit_core::types::DayCountConvention;
    use optkit_pricing::PricingError;

    fn args() -> ContractArgs {
        ContractArgs {
            spot: 100.0,
            strike: 105.0,
            expiry: Some(0.5),
            expiration: None,
            valuation: None,
            rate: None,
            option_type: OptionType::Put,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_contract_uses_config_rate() {
        let contract = args()
            .contract_as_of(0.2, &PricingConfig::default(), today())
            .unwrap();
        assert_eq!(contract.risk_free_rate, 0.05);
        assert_eq!(contract.time_to_expiry, 0.5);
        assert_eq!(contract.option_type, OptionType::Put);
    }

    #[test]
    fn test_explicit_rate_wins() {
        let mut a = args();
        a.rate = Some(-0.01);
        let contract = a
            .contract_as_of(0.2, &PricingConfig::default(), today())
            .unwrap();
        assert_eq!(contract.risk_free_rate, -0.01);
    }

    #[test]
    fn test_expiration_date_with_day_count() {
        let mut a = args();
        a.expiry = None;
        a.expiration = Some("2024-01-31".to_string());

        let act365 = a
            .contract_as_of(0.2, &PricingConfig::default(), today())
            .unwrap();
        assert_relative_eq!(act365.time_to_expiry, 30.0 / 365.0, epsilon = 1e-12);

        let config = PricingConfig {
            day_count: DayCountConvention::ActualActual360,
            ..PricingConfig::default()
        };
        let act360 = a.contract_as_of(0.2, &config, today()).unwrap();
        assert_relative_eq!(act360.time_to_expiry, 30.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_explicit_valuation_date() {
        let mut a = args();
        a.expiry = None;
        a.expiration = Some("2025-06-30".to_string());
        a.valuation = Some("2025-03-31".to_string());
        let contract = a
            .contract_as_of(0.2, &PricingConfig::default(), today())
            .unwrap();
        assert_relative_eq!(contract.time_to_expiry, 91.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_expired_contract_rejected() {
        let mut a = args();
        a.expiry = None;
        a.expiration = Some("2023-12-31".to_string());
        let err = a
            .contract_as_of(0.2, &PricingConfig::default(), today())
            .unwrap_err();
        assert!(matches!(err, CliError::Date(_)));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let err = args()
            .contract_as_of(0.0, &PricingConfig::default(), today())
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Pricing(PricingError::NonPositive {
                field: "volatility",
                ..
            })
        ));
    }
}
