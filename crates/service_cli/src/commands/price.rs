//! Price command implementation
//!
//! Values a single European option with the Black-Scholes closed form.

use optkit_pricing::{d1, d2, price_option, OptionContract};
use serde::Serialize;
use tracing::info;

use super::ContractArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::output::{emit, num, Table};
use crate::Result;

/// Result of the price command
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Inputs as priced
    pub contract: OptionContract,
    /// Theoretical value
    pub price: f64,
    /// Exercise value at the current spot
    pub intrinsic: f64,
    /// Price minus intrinsic value
    pub time_value: f64,
    /// d1 term
    pub d1: f64,
    /// d2 term
    pub d2: f64,
}

/// Prices the contract.
pub fn evaluate(contract: OptionContract) -> PriceReport {
    let price = price_option(&contract);
    let intrinsic = contract.intrinsic_value();
    PriceReport {
        contract,
        price,
        intrinsic,
        time_value: price - intrinsic,
        d1: d1(&contract),
        d2: d2(&contract),
    }
}

fn table(report: &PriceReport) -> Table {
    let c = &report.contract;
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["type".to_string(), c.option_type.to_string()])
        .row(["spot".to_string(), num(c.spot, 4)])
        .row(["strike".to_string(), num(c.strike, 4)])
        .row(["expiry (years)".to_string(), num(c.time_to_expiry, 6)])
        .row(["volatility".to_string(), num(c.volatility, 6)])
        .row(["rate".to_string(), num(c.risk_free_rate, 6)])
        .row(["d1".to_string(), num(report.d1, 6)])
        .row(["d2".to_string(), num(report.d2, 6)])
        .row(["price".to_string(), num(report.price, 4)])
        .row(["intrinsic".to_string(), num(report.intrinsic, 4)])
        .row(["time value".to_string(), num(report.time_value, 4)]);
    table
}

/// Run the price command
pub fn run(
    args: &ContractArgs,
    volatility: f64,
    config: &CliConfig,
    format: OutputFormat,
) -> Result<()> {
    let contract = args.contract(volatility, &config.pricing)?;
    info!(
        option_type = %contract.option_type,
        spot = contract.spot,
        strike = contract.strike,
        "pricing option"
    );

    emit(format, &evaluate(contract), table)
}
