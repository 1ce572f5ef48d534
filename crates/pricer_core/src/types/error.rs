//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations, the common currency that
//!   the layer-specific errors of `pricer_models` and `pricer_pricing` convert into

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `DegenerateInput`: Input is well-formed but carries no information
///   (e.g. an empty final-price vector)
/// - `NumericalInstability`: Computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input carries no information to price from
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Builds an [`PricingError::InvalidInput`] describing a named parameter.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// let err = PricingError::invalid_parameter("spot", -1.0, "must be positive");
    /// assert_eq!(err.to_string(), "Invalid input: spot = -1 (must be positive)");
    /// ```
    pub fn invalid_parameter(name: &str, value: f64, constraint: &str) -> Self {
        PricingError::InvalidInput(format!("{} = {} ({})", name, value, constraint))
    }
}
