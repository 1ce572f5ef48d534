//! Monte Carlo pricer orchestration.
//!
//! [`MonteCarloPricer`] validates every input, simulates terminal prices,
//! aggregates call and put estimates from the same paths, and reports them
//! next to the Black-Scholes closed form.

use pricer_core::types::{MarketParameters, OptionType};
use pricer_models::analytical::{AnalyticalError, BlackScholes};
use tracing::debug;

use super::config::{MonteCarloConfig, SimulationMode};
use super::error::{ConfigError, McError};
use super::paths::{simulate, SimulationOutput};
use super::payoff::{discounted_payoff, PayoffEstimate};

/// Call and put prices side by side.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionPrices {
    /// European call price.
    pub call: f64,
    /// European put price.
    pub put: f64,
}

impl OptionPrices {
    /// Closed-form Black-Scholes prices for `market`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticalError` if σ or T is zero (the formulas divide by
    /// `σ√T`).
    pub fn black_scholes(market: &MarketParameters) -> Result<Self, AnalyticalError> {
        let model = BlackScholes::from_market(market)?;
        Ok(Self {
            call: model.price_call(market.strike(), market.maturity())?,
            put: model.price_put(market.strike(), market.maturity())?,
        })
    }
}

/// Outcome of one pricing run.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer, SimulationMode};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let result = pricer
///     .price(&MarketParameters::default(), SimulationMode::Parallel)
///     .unwrap();
///
/// println!(
///     "Call: {:.4} +/- {:.4} (BS {:.4})",
///     result.call.price,
///     result.call.confidence_95(),
///     result.analytical.call
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    /// Monte Carlo call estimate.
    pub call: PayoffEstimate,
    /// Monte Carlo put estimate, from the same paths.
    pub put: PayoffEstimate,
    /// Black-Scholes reference prices.
    pub analytical: OptionPrices,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Number of steps per path.
    pub n_steps: usize,
    /// Execution mode used.
    pub mode: SimulationMode,
    /// Seed the run was rooted at.
    pub run_seed: u64,
}

impl PricingResult {
    /// Monte Carlo call and put prices.
    #[inline]
    pub fn monte_carlo(&self) -> OptionPrices {
        OptionPrices {
            call: self.call.price,
            put: self.put.price,
        }
    }

    /// Monte Carlo call minus Black-Scholes call.
    #[inline]
    pub fn call_error(&self) -> f64 {
        self.call.price - self.analytical.call
    }

    /// Monte Carlo put minus Black-Scholes put.
    #[inline]
    pub fn put_error(&self) -> f64 {
        self.put.price - self.analytical.put
    }
}

/// Monte Carlo pricing engine.
///
/// Holds a validated configuration and, when a thread count was configured,
/// a dedicated rayon pool that bounds parallel simulation.
#[derive(Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    pool: Option<rayon::ThreadPool>,
}

impl MonteCarloPricer {
    /// Creates a new pricer.
    ///
    /// # Errors
    ///
    /// - `McError::Config` if the configuration is invalid
    /// - `McError::ThreadPool` if the dedicated pool cannot be started
    pub fn new(config: MonteCarloConfig) -> Result<Self, McError> {
        config.validate()?;
        let pool = config
            .threads()
            .map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build())
            .transpose()?;
        Ok(Self { config, pool })
    }

    /// Returns the pricer configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Simulates paths for `market`, on the dedicated pool when one exists.
    ///
    /// # Errors
    ///
    /// Returns `McError::Market` for invalid market parameters and
    /// `McError::Config` for an invalid grid. Nothing is simulated in either
    /// case.
    pub fn simulate(
        &self,
        market: &MarketParameters,
        mode: SimulationMode,
    ) -> Result<SimulationOutput, McError> {
        market.validate()?;
        let run = || simulate(market, &self.config, mode);
        let output = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }?;
        Ok(output)
    }

    /// Prices the European call and put on `market`.
    ///
    /// Validation happens in order before any path is drawn: market
    /// parameters, path count, then the closed-form domain.
    ///
    /// # Errors
    ///
    /// - `McError::Market` for invalid market parameters
    /// - `McError::Config(InvalidPathCount(0))` for an empty run
    /// - `McError::Analytical` if σ or T is zero
    /// - `McError::Aggregation` if the estimate is not finite
    pub fn price(
        &self,
        market: &MarketParameters,
        mode: SimulationMode,
    ) -> Result<PricingResult, McError> {
        market.validate()?;
        if self.config.n_paths() == 0 {
            return Err(ConfigError::InvalidPathCount(0).into());
        }
        let analytical = OptionPrices::black_scholes(market)?;

        let output = self.simulate(market, mode)?;
        let (strike, rate, maturity) = (market.strike(), market.rate(), market.maturity());
        let call = discounted_payoff(
            &output.final_prices,
            OptionType::Call,
            strike,
            rate,
            maturity,
        )?;
        let put = discounted_payoff(&output.final_prices, OptionType::Put, strike, rate, maturity)?;

        debug!(
            call = call.price,
            put = put.price,
            bs_call = analytical.call,
            bs_put = analytical.put,
            "pricing complete"
        );

        Ok(PricingResult {
            call,
            put,
            analytical,
            n_paths: self.config.n_paths(),
            n_steps: self.config.n_steps(),
            mode,
            run_seed: output.run_seed,
        })
    }
}
