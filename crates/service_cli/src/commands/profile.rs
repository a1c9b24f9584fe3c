//! Price profile command implementation
//!
//! Tabulates option value against a range of underlying prices.

use optkit_pricing::{price_profile, OptionContract, ProfilePoint, ProfileSpec};
use serde::Serialize;
use tracing::info;

use super::ContractArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::output::{emit, num, Table};
use crate::Result;

/// Grid overrides for the profile command
#[derive(Debug, Clone, Copy, Default)]
pub struct GridOverrides {
    /// Lowest spot as a fraction of the contract spot
    pub lower: Option<f64>,
    /// Highest spot as a fraction of the contract spot
    pub upper: Option<f64>,
    /// Number of intervals
    pub steps: Option<usize>,
}

impl GridOverrides {
    fn apply(&self, base: ProfileSpec) -> ProfileSpec {
        ProfileSpec {
            lower: self.lower.unwrap_or(base.lower),
            upper: self.upper.unwrap_or(base.upper),
            steps: self.steps.unwrap_or(base.steps),
        }
    }
}

/// Result of the profile command
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    /// Contract at its own spot
    pub contract: OptionContract,
    /// Grid used
    pub spec: ProfileSpec,
    /// One entry per grid spot
    pub points: Vec<ProfilePoint>,
}

fn table(report: &ProfileReport) -> Table {
    let mut table = Table::new(["Spot", "Price", "Intrinsic", "Time value"]);
    for p in &report.points {
        table.row([
            num(p.spot, 2),
            num(p.price, 4),
            num(p.intrinsic, 4),
            num(p.price - p.intrinsic, 4),
        ]);
    }
    table
}

/// Builds the profile report.
pub fn evaluate(contract: OptionContract, spec: ProfileSpec) -> Result<ProfileReport> {
    Ok(ProfileReport {
        contract,
        spec,
        points: price_profile(&contract, &spec)?,
    })
}

/// Run the profile command
pub fn run(
    args: &ContractArgs,
    volatility: f64,
    grid: GridOverrides,
    config: &CliConfig,
    format: OutputFormat,
) -> Result<()> {
    let contract = args.contract(volatility, &config.pricing)?;
    let spec = grid.apply(config.pricing.profile);
    info!(
        lower = spec.lower,
        upper = spec.upper,
        steps = spec.steps,
        "building price profile"
    );

    emit(format, &evaluate(contract, spec)?, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use optkit_core::types::OptionType;

    fn contract() -> OptionContract {
        OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call)
    }

    #[test]
    fn test_overrides_merge_with_config() {
        let spec = GridOverrides {
            steps: Some(4),
            ..GridOverrides::default()
        }
        .apply(ProfileSpec::default());
        assert_eq!(spec.steps, 4);
        assert_eq!(spec.lower, 0.7);
        assert_eq!(spec.upper, 1.3);
    }

    #[test]
    fn test_default_profile_has_21_rows() {
        let report = evaluate(contract(), ProfileSpec::default()).unwrap();
        assert_eq!(report.points.len(), 21);
        // header + 21 data rows + 3 rules
        assert_eq!(table(&report).render().lines().count(), 25);
    }

    #[test]
    fn test_invalid_grid() {
        let spec = ProfileSpec {
            steps: 0,
            ..ProfileSpec::default()
        };
        assert!(matches!(
            evaluate(contract(), spec),
            Err(CliError::Pricing(_))
        ));
    }
}
