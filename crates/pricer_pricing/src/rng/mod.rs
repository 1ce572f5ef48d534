//! # Random Number Generation Infrastructure
//!
//! This module provides the random shock source for Monte Carlo simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Every generator is built from an explicit 64-bit seed
//! - **Independence**: Each worker owns its own [`PricerRng`]; seeds come from
//!   a [`SeedSequence`] that maps `(run seed, stream ordinal)` to distinct values
//! - **No sharing**: Generators are never handed to a parallel region by
//!   shared mutable reference; each chunk of paths constructs its own
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper and the [`ShockSource`] trait
//! - [`seed`]: Run-seed expansion into per-stream seeds
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{PricerRng, SeedSequence, ShockSource};
//!
//! let seeds = SeedSequence::new(12345);
//!
//! // One generator per worker, each from a distinct derived seed
//! let mut worker_0 = seeds.stream(0);
//! let mut worker_1 = seeds.stream(1);
//! assert_ne!(worker_0.seed(), worker_1.seed());
//!
//! // Standard normal variates (mean=0, std=1)
//! let z = worker_0.next_shock();
//!
//! // Batch generation into pre-allocated buffer (zero allocation)
//! let mut buffer = vec![0.0; 1000];
//! worker_1.fill_normal(&mut buffer);
//! ```

mod prng;
mod seed;

// Public re-exports
pub use prng::{PricerRng, ShockSource};
pub use seed::SeedSequence;
