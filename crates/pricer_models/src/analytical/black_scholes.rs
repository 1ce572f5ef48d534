//! Black-Scholes pricing model for European options.
//!
//! This module provides the closed-form reference prices that Monte Carlo
//! estimates are validated against.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::types::{MarketParameters, OptionType};

use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Black-Scholes model for European option pricing.
///
/// Holds the contract-independent inputs (spot, rate, volatility); strike and
/// expiry are supplied per price so one model can price a whole strip.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0).unwrap();
/// let put_price = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, any finite value)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidRate` if rate is NaN or infinite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// assert!(BlackScholes::new(100.0, f64::NAN, 0.2).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate });
        }

        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Creates a model from validated market parameters.
    ///
    /// Fails only on zero volatility, which `MarketParameters` admits but the
    /// closed form does not.
    pub fn from_market(market: &MarketParameters) -> Result<Self, AnalyticalError> {
        Self::new(market.spot(), market.rate(), market.volatility())
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidMaturity` if expiry <= 0
    pub fn d1(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        check_contract(strike, expiry)?;
        Ok(self.d1_unchecked(strike, expiry))
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    pub fn d2(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        Ok(self.d1(strike, expiry)? - self.volatility * expiry.sqrt())
    }

    #[inline]
    fn d1_unchecked(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0).unwrap();
    /// assert!((price - 10.4506).abs() < 1e-3);
    ///
    /// // Expired contracts are outside the formula's domain
    /// assert!(bs.price_call(100.0, 0.0).is_err());
    /// ```
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(OptionType::Call, strike, expiry)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let price = bs.price_put(100.0, 1.0).unwrap();
    /// assert!((price - 5.5735).abs() < 1e-3);
    /// ```
    pub fn price_put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(OptionType::Put, strike, expiry)
    }

    /// Prices either side of a European option.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` / `InvalidMaturity` outside the domain
    /// - `AnalyticalError::NonFinitePrice` if extreme inputs overflow the formula
    pub fn price(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        check_contract(strike, expiry)?;

        let d1 = self.d1_unchecked(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        let price = match option_type {
            OptionType::Call => self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionType::Put => discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        };

        if !price.is_finite() {
            return Err(AnalyticalError::NonFinitePrice { price });
        }

        // Cancellation in the far wings can leave a tiny negative residue
        Ok(price.max(0.0))
    }
}

fn check_contract(strike: f64, expiry: f64) -> Result<(), AnalyticalError> {
    if !(strike > 0.0 && strike.is_finite()) {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    if !(expiry > 0.0 && expiry.is_finite()) {
        return Err(AnalyticalError::InvalidMaturity { maturity: expiry });
    }
    Ok(())
}

/// Black-Scholes price of a European call.
///
/// Argument order follows the textbook `C(S, K, r, σ, T)`.
///
/// # Errors
/// Any of `S`, `K`, `σ`, `T` non-positive, a non-finite `r`, or a price that
/// overflows.
pub fn black_scholes_call(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, rate, volatility)?.price_call(strike, expiry)
}

/// Black-Scholes price of a European put.
///
/// Argument order follows the textbook `P(S, K, r, σ, T)`.
///
/// # Errors
/// Any of `S`, `K`, `σ`, `T` non-positive, a non-finite `r`, or a price that
/// overflows.
pub fn black_scholes_put(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, rate, volatility)?.price_put(strike, expiry)
}
