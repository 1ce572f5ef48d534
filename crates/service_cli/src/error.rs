//! CLI error types

use pricer_core::types::PricingError;
use pricer_pricing::mc::McError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `mcpricer` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid market parameters: {0}")]
    Market(#[from] PricingError),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] McError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
