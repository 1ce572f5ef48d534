//! Error types for the Monte Carlo engine.
//!
//! This module defines structured error types for configuration validation,
//! payoff aggregation and the combined pricing pipeline.

use pricer_core::types::PricingError;
use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

use super::config::{MAX_PATHS, MAX_STEPS};

/// Configuration error for the simulator and pricer.
///
/// These errors occur during construction when invalid parameters are provided,
/// and always before any path is simulated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside the valid range.
    #[error("Invalid path count {0}: must be in range [1, {max}]", max = MAX_PATHS)]
    InvalidPathCount(usize),

    /// Step count outside the valid range.
    #[error("Invalid step count {0}: must be in range [1, {max}]", max = MAX_STEPS)]
    InvalidStepCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Payoff aggregation error.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AggregationError {
    /// No terminal prices to average over.
    #[error("Cannot aggregate payoffs: final price vector is empty")]
    EmptyFinalPrices,

    /// A terminal price or the discounted mean is not a finite number.
    #[error("Aggregated price is not finite: {price}")]
    NonFinite {
        /// The offending terminal price or estimate.
        price: f64,
    },
}

impl From<AggregationError> for PricingError {
    fn from(err: AggregationError) -> Self {
        PricingError::DegenerateInput(err.to_string())
    }
}

/// Umbrella error for the pricing pipeline.
///
/// Every layer's error converts into this type with `?`.
#[derive(Debug, Error)]
pub enum McError {
    /// Invalid market parameters.
    #[error(transparent)]
    Market(#[from] PricingError),

    /// Invalid simulation configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Inputs outside the closed-form domain.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Payoff aggregation failure.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// The dedicated worker pool could not be started.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
