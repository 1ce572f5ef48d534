//! Monte Carlo pricing of European options under geometric Brownian motion.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig   (paths, steps, seed, chunking, worker bound)
//! ├── simulate()         (sequential or chunked parallel path generation)
//! │   ├── TimeGrid       (dt = T / n_steps, computed once)
//! │   └── SeedSequence   (one PricerRng per chunk)
//! ├── discounted_payoff() (mean, standard error)
//! └── OptionPrices::black_scholes() (closed-form reference)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::MarketParameters;
//! use pricer_pricing::mc::{call_price, put_price, simulate, MonteCarloConfig, SimulationMode};
//!
//! let market = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(252)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let output = simulate(&market, &config, SimulationMode::Parallel).unwrap();
//! let call = call_price(&output.final_prices, 100.0, 0.05, 1.0).unwrap();
//! let put = put_price(&output.final_prices, 100.0, 0.05, 1.0).unwrap();
//! assert!(call > put);
//! ```

mod config;
mod error;
mod paths;
mod payoff;
pub mod pi;
mod pricer;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, SimulationMode, TimeGrid, DEFAULT_CHUNK_SIZE,
    MAX_PATHS, MAX_STEPS,
};
pub use error::{AggregationError, ConfigError, McError};
pub use paths::{simulate, simulate_path, simulate_path_into, PriceMatrix, SimulationOutput};
pub use payoff::{call_price, discounted_payoff, put_price, PayoffEstimate};
pub use pi::{estimate_pi, PiEstimate};
pub use pricer::{MonteCarloPricer, OptionPrices, PricingResult};
