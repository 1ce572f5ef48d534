//! # Pricer Engine (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the simulation engine of the 4-layer architecture:
//! - Layer 1 (pricer_core): market parameters, option type, shared errors
//! - Layer 2 (pricer_models): GBM step, Black-Scholes closed form
//! - Layer 3 (this crate): path simulation, payoff aggregation, orchestration
//! - Layer 4 (service_cli): configuration, reporting, CSV export
//!
//! ## Parallelism
//!
//! Paths are independent. Parallel runs split the pre-sized output buffers into
//! disjoint chunks with rayon; every chunk owns a generator seeded from the
//! run seed and the chunk ordinal, so a fixed seed reproduces the same prices
//! whatever the number of worker threads.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::MarketParameters;
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer, SimulationMode};
//!
//! let market = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05).unwrap();
//! let config = MonteCarloConfig::builder()
//!     .n_paths(20_000)
//!     .n_steps(252)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let pricer = MonteCarloPricer::new(config).unwrap();
//! let result = pricer.price(&market, SimulationMode::Parallel).unwrap();
//!
//! assert!((result.call.price - result.analytical.call).abs() < 0.5);
//! assert!((result.put.price - result.analytical.put).abs() < 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

// Random number generation infrastructure
pub mod rng;

// Monte Carlo simulation and pricing
pub mod mc;

// Re-export commonly used items for convenience
pub use mc::{
    MonteCarloConfig, MonteCarloPricer, OptionPrices, PricingResult, SimulationMode,
    SimulationOutput,
};
