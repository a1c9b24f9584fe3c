//! optkit CLI - Command Line Options Analytics
//!
//! Entry point for the optkit pricing and clustering engines.
//!
//! # Commands
//!
//! - `optkit price` - Black-Scholes value of a European option
//! - `optkit greeks` - Price plus the five Greeks
//! - `optkit implied-vol --market-price <p>` - Volatility implied by a quote
//! - `optkit profile` - Value across a grid of underlying prices
//! - `optkit cluster --input <csv>` - k-means clustering of 2-D points
//! - `optkit check` - Configuration summary and engine self-checks
//!
//! Logs go to stderr so that `--format json` output stays parseable.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::cluster::ClusterOverrides;
use commands::profile::GridOverrides;
use commands::ContractArgs;
use config::{CliConfig, LogLevel, OutputFormat};

/// optkit options analytics CLI
#[derive(Parser)]
#[command(name = "optkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "optkit.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Annualised volatility as a decimal
        #[arg(long)]
        vol: f64,
    },

    /// Compute price and Greeks
    Greeks {
        #[command(flatten)]
        contract: ContractArgs,

        /// Annualised volatility as a decimal
        #[arg(long)]
        vol: f64,
    },

    /// Solve for the volatility implied by a market price
    ImpliedVol {
        #[command(flatten)]
        contract: ContractArgs,

        /// Observed option price
        #[arg(long)]
        market_price: f64,

        /// Fail instead of returning a bound when the price is unreachable
        #[arg(long)]
        strict: bool,
    },

    /// Tabulate value across underlying prices
    Profile {
        #[command(flatten)]
        contract: ContractArgs,

        /// Annualised volatility as a decimal
        #[arg(long)]
        vol: f64,

        /// Lowest spot as a fraction of --spot
        #[arg(long)]
        lower: Option<f64>,

        /// Highest spot as a fraction of --spot
        #[arg(long)]
        upper: Option<f64>,

        /// Number of grid intervals
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Cluster 2-D points from a CSV file (columns x, y, optional label)
    Cluster {
        /// Path to the CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of clusters
        #[arg(short)]
        k: Option<usize>,

        /// Iteration budget
        #[arg(long)]
        max_iterations: Option<usize>,

        /// RNG seed for reproducible partitions
        #[arg(long)]
        seed: Option<u64>,

        /// Seed centroids with k-means++
        #[arg(long)]
        plus_plus: bool,

        /// Move clusters that lose all members to the farthest point
        #[arg(long)]
        reseed_empty: bool,
    },

    /// Check configuration and run engine self-checks
    Check,
}

fn load_config(cli: &Cli) -> Result<CliConfig> {
    let mut config = CliConfig::from_file(&cli.config)?;
    config.apply_env()?;

    if let Some(level) = &cli.log_level {
        config.general.log_level = LogLevel::from_str(level)?;
    }
    if cli.verbose {
        config.general.log_level = LogLevel::Debug;
    }
    Ok(config)
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(config.general.log_level);
    debug!(path = %cli.config.display(), ?config, "configuration loaded");

    let format = cli.format.unwrap_or(config.general.output_format);

    match cli.command {
        Commands::Price { contract, vol } => commands::price::run(&contract, vol, &config, format),
        Commands::Greeks { contract, vol } => {
            commands::greeks::run(&contract, vol, &config, format)
        }
        Commands::ImpliedVol {
            contract,
            market_price,
            strict,
        } => commands::implied_vol::run(&contract, market_price, strict, &config, format),
        Commands::Profile {
            contract,
            vol,
            lower,
            upper,
            steps,
        } => {
            let grid = GridOverrides { lower, upper, steps };
            commands::profile::run(&contract, vol, grid, &config, format)
        }
        Commands::Cluster {
            input,
            k,
            max_iterations,
            seed,
            plus_plus,
            reseed_empty,
        } => {
            let overrides = ClusterOverrides {
                k,
                max_iterations,
                seed,
                plus_plus,
                reseed_empty,
            };
            commands::cluster::run(&input, overrides, &config, format)
        }
        Commands::Check => commands::check::run(&config),
    }
}
