//! Check command implementation
//!
//! Prints the build and configuration summary, then runs the engines
//! against known answers.

use optkit_clustering::{total_inertia, DataPoint, KMeans};
use optkit_core::types::OptionType;
use optkit_pricing::{price_option, ImpliedVolSolver, OptionContract};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// One self-check outcome
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// What was checked
    pub name: &'static str,
    /// Whether it matched
    pub passed: bool,
    /// Observed value, for the report
    pub detail: String,
}

fn outcome(name: &'static str, passed: bool, detail: String) -> CheckOutcome {
    CheckOutcome {
        name,
        passed,
        detail,
    }
}

fn atm_call() -> OptionContract {
    OptionContract::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call)
}

fn check_reference_price() -> CheckOutcome {
    let price = price_option(&atm_call());
    outcome(
        "ATM call matches 10.4506",
        (price - 10.4506).abs() < 1e-3,
        format!("{:.6}", price),
    )
}

fn check_put_call_parity() -> CheckOutcome {
    let call = atm_call();
    let put = call.with_option_type(OptionType::Put);
    let forward = call.spot - call.strike * call.discount_factor();
    let gap = price_option(&call) - price_option(&put) - forward;
    outcome(
        "put-call parity",
        gap.abs() < 1e-3,
        format!("gap {:.2e}", gap),
    )
}

fn check_implied_vol_round_trip(config: &CliConfig) -> CheckOutcome {
    let contract = atm_call();
    let solver = ImpliedVolSolver::new(config.pricing.implied_vol);
    let result = solver.solve_detailed(&contract, price_option(&contract));
    outcome(
        "implied vol recovers 0.20",
        result.converged && (result.volatility - 0.2).abs() < 1e-3,
        format!("{:.6} in {} iterations", result.volatility, result.iterations),
    )
}

fn check_kmeans_two_groups() -> CheckOutcome {
    let points: Vec<DataPoint> = [
        (0.0, 0.0),
        (0.0, 1.0),
        (1.0, 0.0),
        (10.0, 10.0),
        (10.0, 11.0),
        (11.0, 10.0),
    ]
    .into_iter()
    .map(|(x, y)| DataPoint::at(x, y))
    .collect();

    let mut rng = StdRng::seed_from_u64(42);
    match KMeans::new(2).fit(&points, &mut rng) {
        Ok(fit) => {
            let inertia = total_inertia(&fit.clusters);
            let balanced = fit.clusters.iter().all(|c| c.len() == 3);
            outcome(
                "k-means separates two groups",
                fit.converged && balanced && (inertia - 8.0 / 3.0).abs() < 1e-9,
                format!("inertia {:.4} after {} iterations", inertia, fit.iterations),
            )
        }
        Err(e) => outcome("k-means separates two groups", false, e.to_string()),
    }
}

/// Runs every self-check.
pub fn self_checks(config: &CliConfig) -> Vec<CheckOutcome> {
    vec![
        check_reference_price(),
        check_put_call_parity(),
        check_implied_vol_round_trip(config),
        check_kmeans_two_groups(),
    ]
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Running self-checks");

    println!("optkit System Check");
    println!("===================\n");

    println!("Build:");
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    println!("  Rayon threads: {}", rayon::current_num_threads());
    println!();

    println!("Configuration:");
    println!("  Log level: {}", config.general.log_level);
    println!("  Risk-free rate: {}", config.pricing.risk_free_rate);
    println!("  Day count: {}", config.pricing.day_count);
    println!(
        "  Implied vol: precision {}, {} iterations, bracket [{}, {}]",
        config.pricing.implied_vol.precision,
        config.pricing.implied_vol.max_iterations,
        config.pricing.implied_vol.lower,
        config.pricing.implied_vol.upper
    );
    println!(
        "  Clustering: k = {}, {} iterations, seed {}",
        config.clustering.k,
        config.clustering.max_iterations,
        config
            .clustering
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    println!();

    println!("Engines:");
    let outcomes = self_checks(config);
    for o in &outcomes {
        let mark = if o.passed { "✓" } else { "✗" };
        println!("  {} {} ({})", mark, o.name, o.detail);
    }
    println!();

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    if failed > 0 {
        return Err(CliError::InvalidArgument(format!("{} self-check(s) failed", failed)));
    }

    println!("All checks passed!");
    Ok(())
}
