//! Implied volatility command implementation

use optkit_pricing::implied_vol::VOL_LOWER_BOUND;
use optkit_pricing::{price_option, ImpliedVolConfig, ImpliedVolSolver, OptionContract};
use serde::Serialize;
use tracing::{info, warn};

use super::ContractArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::output::{emit, num, Table};
use crate::{CliError, Result};

/// Result of the implied-vol command
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolReport {
    /// Observed option price
    pub market_price: f64,
    /// Solved volatility
    pub volatility: f64,
    /// Model price at the solved volatility
    pub model_price: f64,
    /// Bisection steps used
    pub iterations: usize,
    /// Whether the price precision was met
    pub converged: bool,
}

/// Solves for implied volatility.
///
/// Without `strict`, a non-converged search still produces a report with
/// `converged == false`. With `strict`, an unreachable price or exhausted
/// budget is an error.
pub fn evaluate(
    contract: &OptionContract,
    market_price: f64,
    solver_config: ImpliedVolConfig,
    strict: bool,
) -> Result<ImpliedVolReport> {
    if !market_price.is_finite() {
        return Err(CliError::InvalidArgument(format!(
            "market price must be finite, got {}",
            market_price
        )));
    }

    let solver = ImpliedVolSolver::new(solver_config);
    let result = solver.solve_detailed(contract, market_price);

    if strict {
        solver.solve_checked(contract, market_price)?;
    } else if !result.converged {
        warn!(
            market_price,
            volatility = result.volatility,
            "implied volatility did not converge; market price may be outside the achievable range"
        );
    }

    Ok(ImpliedVolReport {
        market_price,
        volatility: result.volatility,
        model_price: price_option(&contract.with_volatility(result.volatility)),
        iterations: result.iterations,
        converged: result.converged,
    })
}

fn table(report: &ImpliedVolReport) -> Table {
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["market price".to_string(), num(report.market_price, 4)])
        .row(["implied vol".to_string(), num(report.volatility, 6)])
        .row(["model price".to_string(), num(report.model_price, 4)])
        .row(["iterations".to_string(), report.iterations.to_string()])
        .row(["converged".to_string(), report.converged.to_string()]);
    table
}

/// Run the implied-vol command
pub fn run(
    args: &ContractArgs,
    market_price: f64,
    strict: bool,
    config: &CliConfig,
    format: OutputFormat,
) -> Result<()> {
    // Volatility is the unknown; any valid placeholder passes validation
    let contract = args.contract(VOL_LOWER_BOUND, &config.pricing)?;
    info!(market_price, strict, "solving implied volatility");

    let report = evaluate(&contract, market_price, config.pricing.implied_vol, strict)?;
    emit(format, &report, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optkit_core::types::OptionType;
    use optkit_pricing::PricingError;

    fn contract() -> OptionContract {
        OptionContract::new(100.0, 100.0, 1.0, VOL_LOWER_BOUND, 0.05, OptionType::Call)
    }

    #[test]
    fn test_recovers_textbook_vol() {
        let report = evaluate(&contract(), 10.4506, ImpliedVolConfig::default(), false).unwrap();
        assert!(report.converged);
        assert_relative_eq!(report.volatility, 0.2, epsilon = 1e-3);
        assert!((report.model_price - 10.4506).abs() < 1e-4);
    }

    #[test]
    fn test_lenient_out_of_range() {
        let report = evaluate(&contract(), 150.0, ImpliedVolConfig::default(), false).unwrap();
        assert!(!report.converged);
        assert!(report.volatility > 4.99);
    }

    #[test]
    fn test_strict_out_of_range() {
        let err = evaluate(&contract(), 150.0, ImpliedVolConfig::default(), true).unwrap_err();
        assert!(matches!(
            err,
            CliError::Pricing(PricingError::PriceOutOfBracket { .. })
        ));
    }

    #[test]
    fn test_non_finite_market_price() {
        let err = evaluate(&contract(), f64::NAN, ImpliedVolConfig::default(), false).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
