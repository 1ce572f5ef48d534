//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions used as an oracle for the
//! Monte Carlo engine:
//! - Standard normal CDF via the error function
//! - Black-Scholes call and put prices
//!
//! ## Design Principles
//!
//! - **Domain checks up front**: `σ > 0`, `T > 0`, `S > 0` and `K > 0` are
//!   verified before any logarithm or division is evaluated
//! - **Numerical Stability**: Uses `erf`-based CDF rather than numerical integration

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{black_scholes_call, black_scholes_put, BlackScholes};
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
