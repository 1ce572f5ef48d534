//! mcpricer - Monte Carlo European Option Pricer CLI
//!
//! This is the operational entry point for the Monte Carlo pricing engine.
//!
//! # Commands
//!
//! - `mcpricer price` - Price a European call and put, compare with Black-Scholes
//! - `mcpricer compare` - Time sequential vs parallel simulation on the same inputs
//! - `mcpricer export --output dist/Data.csv` - Write simulated paths as CSV
//! - `mcpricer pi` - Monte Carlo estimate of π
//!
//! # Architecture
//!
//! As the service layer, this crate gathers parameters (config file,
//! environment, flags or interactive prompts), drives pricer_pricing and
//! renders its results.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pricer_pricing::mc::{SimulationMode, DEFAULT_CHUNK_SIZE};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod export;
mod prompt;

use config::{AppConfig, LogLevel, RunArgs};
pub use error::{CliError, Result};

/// Monte Carlo European Option Pricer CLI
#[derive(Parser)]
#[command(name = "mcpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "MCPRICER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, env = "MCPRICER_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Execution mode flag
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Sequential,
    Parallel,
}

impl From<ModeArg> for SimulationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => SimulationMode::Sequential,
            ModeArg::Parallel => SimulationMode::Parallel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European call and put
    Price {
        #[command(flatten)]
        run: RunArgs,

        /// Execution mode
        #[arg(short, long, value_enum, default_value = "parallel")]
        mode: ModeArg,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Time sequential and parallel runs on the same inputs
    Compare {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Simulate and write every path to a CSV file
    Export {
        #[command(flatten)]
        run: RunArgs,

        /// Execution mode
        #[arg(short, long, value_enum, default_value = "parallel")]
        mode: ModeArg,

        /// Output CSV file
        #[arg(short, long, default_value = "dist/Data.csv")]
        output: PathBuf,

        /// Average each group of N consecutive paths into one column
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Column limit used to pick a batch size when none is given (0 = unlimited)
        #[arg(long, default_value = "100")]
        max_columns: usize,
    },

    /// Estimate π by uniform sampling of the unit square
    Pi {
        /// Number of points to sample
        #[arg(short = 'n', long, default_value = "1000000")]
        points: u64,

        /// Run seed for reproducible results
        #[arg(long, env = "MCPRICER_SEED")]
        seed: Option<u64>,

        /// Execution mode
        #[arg(short, long, value_enum, default_value = "parallel")]
        mode: ModeArg,

        /// Points per parallel task
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE as u64)]
        chunk_size: u64,
    },
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Layer flags (and optional prompts) over the loaded file configuration
fn resolve(base: AppConfig, run: &RunArgs) -> Result<AppConfig> {
    let config = base.merge_with_cli(run)?;
    if !run.interactive {
        return Ok(config);
    }
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    prompt::prompt_config(&mut stdin.lock(), &mut stdout.lock(), config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = AppConfig::load(cli.config.as_deref())?;
    let log_level = match cli.log_level.as_deref() {
        Some(level) => level.parse()?,
        None => file_config.log_level,
    };
    init_tracing(log_level);

    if let Some(path) = &cli.config {
        info!("Loaded configuration from {}", path.display());
    }

    match cli.command {
        Commands::Price { run, mode, format } => {
            let config = resolve(file_config, &run)?;
            commands::price::run(&config, mode.into(), &format)
        }
        Commands::Compare { run } => {
            let config = resolve(file_config, &run)?;
            commands::compare::run(&config)
        }
        Commands::Export {
            run,
            mode,
            output,
            batch_size,
            max_columns,
        } => {
            let config = resolve(file_config, &run)?;
            commands::export::run(&config, mode.into(), &output, batch_size, max_columns)
        }
        Commands::Pi {
            points,
            seed,
            mode,
            chunk_size,
        } => commands::pi::run(points, seed, mode.into(), chunk_size),
    }
}
