//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Inputs outside the domain of the closed-form formulas,
//!   or a closed-form price that evaluated to NaN or infinity

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// The Black-Scholes `d1` term divides by `σ√T` and takes `ln(S/K)`, so any
/// non-positive value among those four inputs is rejected here rather than
/// propagated as `NaN` or `Inf`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: 0.0 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid time to expiry (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid risk-free rate (NaN or infinite).
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Valid inputs whose closed-form price overflowed or became NaN.
    #[error("Closed-form price is not finite: {price}")]
    NonFinitePrice {
        /// The computed price
        price: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NonFinitePrice { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_maturity_display() {
        let err = AnalyticalError::InvalidMaturity { maturity: 0.0 };
        assert_eq!(format!("{}", err), "Invalid maturity: T = 0");
    }

    #[test]
    fn test_invalid_spot_display() {
        let err = AnalyticalError::InvalidSpot { spot: -100.0 };
        assert_eq!(format!("{}", err), "Invalid spot price: S = -100");
    }

    #[test]
    fn test_invalid_strike_display() {
        let err = AnalyticalError::InvalidStrike { strike: 0.0 };
        assert_eq!(format!("{}", err), "Invalid strike price: K = 0");
    }

    #[test]
    fn test_invalid_rate_display() {
        let err = AnalyticalError::InvalidRate { rate: f64::NAN };
        assert_eq!(format!("{}", err), "Invalid rate: r = NaN");
    }

    #[test]
    fn test_non_finite_price_is_numerical_instability() {
        let err: PricingError = AnalyticalError::NonFinitePrice {
            price: f64::INFINITY,
        }
        .into();
        assert_eq!(
            err,
            PricingError::NumericalInstability("Closed-form price is not finite: inf".to_string())
        );
    }

    #[test]
    fn test_conversion_to_pricing_error() {
        let err: PricingError = AnalyticalError::InvalidMaturity { maturity: -1.0 }.into();
        assert_eq!(
            err,
            PricingError::InvalidInput("Invalid maturity: T = -1".to_string())
        );
    }
}
