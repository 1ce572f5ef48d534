//! Discounted payoff aggregation.
//!
//! Turns a vector of terminal prices into a present-value estimate:
//!
//! ```text
//! price = e^{-rT} × mean(payoff(S_T))
//! std_error = e^{-rT} × stdev(payoff(S_T)) / sqrt(n)
//! ```
//!
//! The sample standard deviation uses the `n - 1` denominator; a single path
//! reports a standard error of zero.

use pricer_core::types::OptionType;

use super::error::AggregationError;

/// Point estimate of a discounted expected payoff.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PayoffEstimate {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the discounted mean.
    pub std_error: f64,
}

impl PayoffEstimate {
    /// Returns the 95% confidence interval half-width (1.96 × std_error).
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Aggregates discounted payoffs of `option_type` over `final_prices`.
///
/// # Errors
///
/// - `AggregationError::EmptyFinalPrices` if `final_prices` is empty
/// - `AggregationError::NonFinite` if any terminal price is NaN or infinite,
///   or if the estimate itself overflows
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionType;
/// use pricer_pricing::mc::discounted_payoff;
///
/// let estimate = discounted_payoff(&[90.0, 110.0], OptionType::Call, 100.0, 0.0, 1.0).unwrap();
/// assert_eq!(estimate.price, 5.0);
/// ```
pub fn discounted_payoff(
    final_prices: &[f64],
    option_type: OptionType,
    strike: f64,
    rate: f64,
    maturity: f64,
) -> Result<PayoffEstimate, AggregationError> {
    if final_prices.is_empty() {
        return Err(AggregationError::EmptyFinalPrices);
    }
    // `max(NaN - K, 0)` is 0, so a NaN terminal would otherwise pay nothing
    if let Some(&price) = final_prices.iter().find(|s| !s.is_finite()) {
        return Err(AggregationError::NonFinite { price });
    }

    let n = final_prices.len() as f64;
    let discount = (-rate * maturity).exp();

    let mean = final_prices
        .iter()
        .map(|&s| option_type.intrinsic(s, strike))
        .sum::<f64>()
        / n;

    let variance = if final_prices.len() > 1 {
        final_prices
            .iter()
            .map(|&s| {
                let d = option_type.intrinsic(s, strike) - mean;
                d * d
            })
            .sum::<f64>()
            / (n - 1.0)
    } else {
        0.0
    };

    let price = discount * mean;
    if !price.is_finite() {
        return Err(AggregationError::NonFinite { price });
    }

    Ok(PayoffEstimate {
        price,
        std_error: discount * (variance / n).sqrt(),
    })
}

/// Monte Carlo European call price: `e^{-rT} × mean(max(S - K, 0))`.
///
/// # Errors
///
/// Returns `AggregationError::EmptyFinalPrices` for an empty input and
/// `AggregationError::NonFinite` for a NaN or infinite terminal price.
pub fn call_price(
    final_prices: &[f64],
    strike: f64,
    rate: f64,
    maturity: f64,
) -> Result<f64, AggregationError> {
    discounted_payoff(final_prices, OptionType::Call, strike, rate, maturity).map(|e| e.price)
}

/// Monte Carlo European put price: `e^{-rT} × mean(max(K - S, 0))`.
///
/// # Errors
///
/// Returns `AggregationError::EmptyFinalPrices` for an empty input and
/// `AggregationError::NonFinite` for a NaN or infinite terminal price.
pub fn put_price(
    final_prices: &[f64],
    strike: f64,
    rate: f64,
    maturity: f64,
) -> Result<f64, AggregationError> {
    discounted_payoff(final_prices, OptionType::Put, strike, rate, maturity).map(|e| e.price)
}
