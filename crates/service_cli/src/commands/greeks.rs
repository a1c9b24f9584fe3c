//! Greeks command implementation

use optkit_pricing::{compute_greeks, price_option, Greeks, OptionContract};
use serde::Serialize;
use tracing::info;

use super::ContractArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::output::{emit, num, Table};
use crate::Result;

/// Result of the greeks command
#[derive(Debug, Clone, Serialize)]
pub struct GreeksReport {
    /// Inputs as priced
    pub contract: OptionContract,
    /// Theoretical value
    pub price: f64,
    /// Sensitivities (theta per day, vega and rho per 1%)
    pub greeks: Greeks,
}

/// Computes price and Greeks for the contract.
pub fn evaluate(contract: OptionContract) -> GreeksReport {
    GreeksReport {
        contract,
        price: price_option(&contract),
        greeks: compute_greeks(&contract),
    }
}

fn greek_row(name: &str, value: f64, unit: &str) -> [String; 3] {
    [name.to_string(), num(value, 6), unit.to_string()]
}

fn table(report: &GreeksReport) -> Table {
    let g = &report.greeks;
    let mut table = Table::new(["Greek", "Value", "Unit"]);
    table
        .row(["price".to_string(), num(report.price, 4)])
        .row(greek_row("delta", g.delta, "per 1.00 spot"))
        .row(greek_row("gamma", g.gamma, "per 1.00 spot"))
        .row(greek_row("theta", g.theta, "per day"))
        .row(greek_row("vega", g.vega, "per 1% vol"))
        .row(greek_row("rho", g.rho, "per 1% rate"));
    table
}

/// Run the greeks command
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
        "computing greeks"
    );

    emit(format, &evaluate(contract), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optkit_core::types::OptionType;

    #[test]
    fn test_evaluate_matches_engine() {
        let contract = OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call);
        let report = evaluate(contract);
        assert_eq!(report.greeks, compute_greeks(&contract));
        assert_relative_eq!(report.greeks.delta, 0.6368, epsilon = 1e-4);
    }

    #[test]
    fn test_table_rows() {
        let report = evaluate(OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Put));
        let rendered = table(&report).render();
        for greek in ["delta", "gamma", "theta", "vega", "rho"] {
            assert!(rendered.contains(greek), "missing {}", greek);
        }
        assert!(rendered.contains("-0.363"));
    }
}
