//! Stochastic process models.
//!
//! This module provides the discrete update rule for Monte Carlo simulation:
//! - [`next_price`]: One exact log-space step of geometric Brownian motion
//! - [`GbmStep`]: The same step with drift and diffusion coefficients hoisted
//!   out of the per-step loop
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{next_price, GbmStep};
//!
//! let dt = 1.0 / 252.0;
//! let step = GbmStep::new(0.05, 0.2, dt);
//!
//! let a = step.advance(100.0, 0.3);
//! let b = next_price(100.0, 0.05, 0.2, dt, 0.3);
//! assert_eq!(a, b);
//! ```

pub mod gbm;

pub use gbm::{next_price, GbmStep};
