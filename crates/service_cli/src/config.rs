//! CLI configuration loading
//!
//! Loads `optkit.toml`, then applies environment overrides.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments (applied by the caller)
//! 2. Environment variables (`OPTKIT_LOG_LEVEL`, `OPTKIT_SEED`)
//! 3. Config file
//! 4. Default values

use optkit_clustering::{EmptyClusterPolicy, Seeding, DEFAULT_MAX_ITERATIONS};
use optkit_core::types::DayCountConvention;
use optkit_pricing::{ImpliedVolConfig, ProfileSpec};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding `general.log_level`.
pub const ENV_LOG_LEVEL: &str = "OPTKIT_LOG_LEVEL";

/// Environment variable overriding `clustering.seed`.
pub const ENV_SEED: &str = "OPTKIT_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Config file could not be read or parsed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable holds an unusable value
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every k-means pass
    Trace,
    /// Solver and clustering diagnostics
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Dropped inputs and other recoverable problems
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CliConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Option pricing settings
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Clustering settings
    #[serde(default)]
    pub clustering: ClusteringConfig,
}

/// General CLI settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: LogLevel,

    /// Output format when `--format` is not given
    pub output_format: OutputFormat,
}

/// Pricing settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Risk-free rate used when `--rate` is not given
    pub risk_free_rate: f64,

    /// Convention for turning an expiration date into years
    pub day_count: DayCountConvention,

    /// Implied volatility search
    pub implied_vol: ImpliedVolConfig,

    /// Default spot grid for `profile`
    pub profile: ProfileSpec,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            day_count: DayCountConvention::default(),
            implied_vol: ImpliedVolConfig::default(),
            profile: ProfileSpec::default(),
        }
    }
}

/// Clustering settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of clusters when `-k` is not given
    pub k: usize,

    /// Iteration budget
    pub max_iterations: usize,

    /// RNG seed; unset means a fresh random partition every run
    pub seed: Option<u64>,

    /// Initial centroid selection
    pub seeding: Seeding,

    /// Handling of clusters that lose all members
    pub empty_cluster_policy: EmptyClusterPolicy,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            seeding: Seeding::default(),
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `OPTKIT_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.general.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(seed) = lookup(ENV_SEED) {
            let parsed = seed.trim().parse().map_err(|_| {
                let message = format!("{} must be an unsigned integer, got '{}'", ENV_SEED, seed);
                ConfigError::EnvError(message)
            })?;
            self.clustering.seed = Some(parsed);
        }

        Ok(())
    }
}
