//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`MCPRICER_*`, resolved by clap)
//! 3. Config file
//! 4. Default values

use clap::Args;
use pricer_core::types::MarketParameters;
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_CHUNK_SIZE, MAX_STEPS};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Default number of simulated paths
pub const DEFAULT_PATHS: usize = 100_000;

/// Default number of steps per path (daily steps for one year)
pub const DEFAULT_STEPS: usize = 252;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid step count: {0}. Must be at least 1")]
    InvalidStepCount(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
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

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Simulation settings (`[simulation]` table)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of simulated paths
    pub paths: usize,
    /// Requested steps per path, clamped to `MAX_STEPS`
    pub steps: usize,
    /// Run seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Dedicated worker count; global rayon pool when absent
    pub threads: Option<usize>,
    /// Paths per parallel task
    pub chunk_size: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS,
            steps: DEFAULT_STEPS,
            seed: None,
            threads: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Full application configuration
///
/// ```toml
/// log_level = "debug"
///
/// [market]
/// spot = 100.0
/// strike = 105.0
///
/// [simulation]
/// paths = 200000
/// steps = 252
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Market parameters (`[market]` table)
    pub market: MarketParameters,
    /// Simulation settings (`[simulation]` table)
    pub simulation: SimulationSettings,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

/// Command-line overrides shared by the pricing subcommands
///
/// Every flag also reads an `MCPRICER_*` environment variable; an explicit
/// flag wins over the variable.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Current asset price (S0)
    #[arg(long, env = "MCPRICER_SPOT")]
    pub spot: Option<f64>,

    /// Strike price (K)
    #[arg(long, env = "MCPRICER_STRIKE")]
    pub strike: Option<f64>,

    /// Time to expiration in years (e.g. 0.5 for 6 months)
    #[arg(long, env = "MCPRICER_MATURITY")]
    pub maturity: Option<f64>,

    /// Volatility as a decimal (e.g. 0.2 for 20%)
    #[arg(long, env = "MCPRICER_VOLATILITY")]
    pub volatility: Option<f64>,

    /// Risk-free interest rate as a decimal (e.g. 0.05 for 5%)
    #[arg(long, env = "MCPRICER_RATE")]
    pub rate: Option<f64>,

    /// Number of simulation paths
    #[arg(short = 'n', long, env = "MCPRICER_PATHS")]
    pub paths: Option<usize>,

    /// Number of time steps per path (values above 1000 are clamped)
    #[arg(short, long, env = "MCPRICER_STEPS")]
    pub steps: Option<usize>,

    /// Run seed for reproducible results
    #[arg(long, env = "MCPRICER_SEED")]
    pub seed: Option<u64>,

    /// Bound parallel work to N worker threads
    #[arg(long, env = "MCPRICER_THREADS")]
    pub threads: Option<usize>,

    /// Paths per parallel task
    #[arg(long, env = "MCPRICER_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Prompt for market parameters and path/step counts on stdin
    #[arg(short, long)]
    pub interactive: bool,
}

/// Clamps a requested step count to `[1, MAX_STEPS]`
///
/// Zero is rejected; anything above `MAX_STEPS` is reduced with a warning.
pub fn clamp_steps(requested: usize) -> Result<usize, ConfigError> {
    match requested {
        0 => Err(ConfigError::InvalidStepCount(0)),
        n if n > MAX_STEPS => {
            warn!(
                requested = n,
                max = MAX_STEPS,
                "Step count exceeds maximum; clamping to {}",
                MAX_STEPS
            );
            Ok(MAX_STEPS)
        }
        n => Ok(n),
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Merge with CLI arguments (CLI takes precedence), then normalise
    pub fn merge_with_cli(mut self, cli: &RunArgs) -> crate::Result<Self> {
        let m = self.market;
        self.market = MarketParameters::new(
            cli.spot.unwrap_or(m.spot()),
            cli.strike.unwrap_or(m.strike()),
            cli.maturity.unwrap_or(m.maturity()),
            cli.volatility.unwrap_or(m.volatility()),
            cli.rate.unwrap_or(m.rate()),
        )?;

        let sim = &mut self.simulation;
        if let Some(paths) = cli.paths {
            sim.paths = paths;
        }
        if let Some(steps) = cli.steps {
            sim.steps = steps;
        }
        if cli.seed.is_some() {
            sim.seed = cli.seed;
        }
        if cli.threads.is_some() {
            sim.threads = cli.threads;
        }
        if let Some(chunk_size) = cli.chunk_size {
            sim.chunk_size = chunk_size;
        }

        self.normalise()
    }

    /// Clamp the step count and re-validate the market parameters
    pub fn normalise(mut self) -> crate::Result<Self> {
        self.simulation.steps = clamp_steps(self.simulation.steps)?;
        self.market.validate()?;
        Ok(self)
    }

    /// Engine configuration for this run
    pub fn monte_carlo_config(&self, retain_paths: bool) -> crate::Result<MonteCarloConfig> {
        let sim = &self.simulation;
        let mut builder = MonteCarloConfig::builder()
            .n_paths(sim.paths)
            .n_steps(sim.steps)
            .maybe_seed(sim.seed)
            .chunk_size(sim.chunk_size)
            .retain_paths(retain_paths);
        if let Some(threads) = sim.threads {
            builder = builder.threads(threads);
        }
        Ok(builder.build().map_err(pricer_pricing::mc::McError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.market, MarketParameters::default());
        assert_eq!(config.simulation.paths, 100_000);
        assert_eq!(config.simulation.steps, 252);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.simulation.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_clamp_steps() {
        assert_eq!(clamp_steps(1).unwrap(), 1);
        assert_eq!(clamp_steps(252).unwrap(), 252);
        assert_eq!(clamp_steps(1000).unwrap(), 1000);
        assert_eq!(clamp_steps(5000).unwrap(), 1000);
        assert!(matches!(
            clamp_steps(0),
            Err(ConfigError::InvalidStepCount(0))
        ));
    }

    #[test]
    fn test_toml_deserialization() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [market]
            spot = 95.0
            strike = 100.0
            maturity = 0.5
            volatility = 0.3
            rate = 0.01

            [simulation]
            paths = 5000
            steps = 50
            seed = 7
            threads = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.market.spot(), 95.0);
        assert_eq!(config.market.volatility(), 0.3);
        assert_eq!(config.simulation.paths, 5000);
        assert_eq!(config.simulation.steps, 50);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.threads, Some(2));
        assert_eq!(config.simulation.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = AppConfig::from_toml("[simulation]\npaths = 10\n").unwrap();
        assert_eq!(config.simulation.paths, 10);
        assert_eq!(config.simulation.steps, DEFAULT_STEPS);
        assert_eq!(config.market, MarketParameters::default());
    }

    #[test]
    fn test_toml_invalid_log_level() {
        let result = AppConfig::from_toml("log_level = \"loud\"");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file(Path::new("/nonexistent/mcpricer.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = AppConfig::from_toml("[market]\nstrike = 90.0\n[simulation]\nsteps = 100\n")
            .unwrap();
        let cli = RunArgs {
            strike: Some(110.0),
            paths: Some(1234),
            seed: Some(9),
            ..RunArgs::default()
        };

        let config = file.merge_with_cli(&cli).unwrap();
        assert_eq!(config.market.strike(), 110.0);
        assert_eq!(config.simulation.paths, 1234);
        assert_eq!(config.simulation.steps, 100);
        assert_eq!(config.simulation.seed, Some(9));
    }

    #[test]
    fn test_merge_clamps_steps() {
        let cli = RunArgs {
            steps: Some(5000),
            ..RunArgs::default()
        };
        let config = AppConfig::default().merge_with_cli(&cli).unwrap();
        assert_eq!(config.simulation.steps, MAX_STEPS);

        let engine = config.monte_carlo_config(false).unwrap();
        assert_eq!(engine.n_steps(), 1000);
    }

    #[test]
    fn test_merge_rejects_zero_steps() {
        let cli = RunArgs {
            steps: Some(0),
            ..RunArgs::default()
        };
        let result = AppConfig::default().merge_with_cli(&cli);
        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::InvalidStepCount(0)))
        ));
    }

    #[test]
    fn test_merge_rejects_invalid_market() {
        let cli = RunArgs {
            spot: Some(-1.0),
            ..RunArgs::default()
        };
        let result = AppConfig::default().merge_with_cli(&cli);
        assert!(matches!(result, Err(CliError::Market(_))));
    }

    #[test]
    fn test_monte_carlo_config_carries_settings() {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(3);
        config.simulation.threads = Some(2);
        config.simulation.chunk_size = 128;

        let engine = config.monte_carlo_config(true).unwrap();
        assert_eq!(engine.seed(), Some(3));
        assert_eq!(engine.threads(), Some(2));
        assert_eq!(engine.chunk_size(), 128);
        assert!(engine.retain_paths());
    }
}
