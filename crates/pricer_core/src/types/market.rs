//! Market inputs for a single pricing run.
//!
//! [`MarketParameters`] bundles the five quantities every pricer in the
//! workspace needs. Instances are validated once on construction and are
//! immutable afterwards; the pricing layers only ever read them.

use super::error::PricingError;

/// Option side: the right to buy (call) or sell (put) at the strike.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// assert_eq!(OptionType::Call.intrinsic(120.0, 100.0), 20.0);
/// assert_eq!(OptionType::Put.intrinsic(120.0, 100.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Pays max(S_T - K, 0) at expiry.
    Call,
    /// Pays max(K - S_T, 0) at expiry.
    Put,
}

impl OptionType {
    /// Exercise value at expiry, floored at zero.
    #[inline]
    pub fn intrinsic(self, terminal: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (terminal - strike).max(0.0),
            OptionType::Put => (strike - terminal).max(0.0),
        }
    }

    /// Lowercase label used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market parameters for a European option under geometric Brownian motion.
///
/// # Invariants
///
/// - `spot > 0`, `strike > 0`, `maturity > 0`
/// - `volatility >= 0` (zero is allowed here; the analytical pricer rejects it separately)
/// - every field is finite
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParameters;
///
/// let market = MarketParameters::new(100.0, 105.0, 0.5, 0.25, 0.03).unwrap();
/// assert_eq!(market.strike(), 105.0);
///
/// assert!(MarketParameters::new(0.0, 105.0, 0.5, 0.25, 0.03).is_err());
/// assert!(MarketParameters::new(100.0, 105.0, 0.5, -0.25, 0.03).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketParameters {
    /// Current asset price (S₀).
    spot: f64,
    /// Strike price (K).
    strike: f64,
    /// Time to expiration in years (T).
    maturity: f64,
    /// Annualised volatility (σ).
    volatility: f64,
    /// Continuously compounded risk-free rate (r).
    rate: f64,
}

impl MarketParameters {
    /// Creates validated market parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInput`] naming the first offending field.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        volatility: f64,
        rate: f64,
    ) -> Result<Self, PricingError> {
        let market = Self {
            spot,
            strike,
            maturity,
            volatility,
            rate,
        };
        market.validate()?;
        Ok(market)
    }

    /// Re-checks the invariants.
    ///
    /// Deserialised values bypass [`new`](Self::new), so callers loading
    /// parameters from a file should call this before pricing.
    pub fn validate(&self) -> Result<(), PricingError> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("maturity", self.maturity)?;

        if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                self.volatility,
                "must be finite and non-negative",
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                self.rate,
                "must be finite",
            ));
        }
        Ok(())
    }

    /// Current asset price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiration in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Present-value factor `exp(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            volatility: 0.2,
            rate: 0.05,
        }
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}
