//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic dynamics and closed-form formulas.
//!
//! This crate provides:
//! - The geometric Brownian motion step used by every Monte Carlo path (`models::gbm`)
//! - The standard normal distribution functions (`analytical::distributions`)
//! - Black-Scholes prices for European calls and puts (`analytical::black_scholes`)
//!
//! ## Design Principles
//!
//! - **Pure functions**: No state, no allocation, identical results on any thread
//! - **Validated entry points**: Degenerate inputs are rejected with
//!   [`AnalyticalError`](analytical::AnalyticalError) instead of yielding `NaN`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod models;
