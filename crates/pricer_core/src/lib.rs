//! # pricer_core: Foundation Types for the Monte Carlo Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Market inputs: [`MarketParameters`](types::MarketParameters) (`types::market`)
//! - Contract side: [`OptionType`](types::OptionType) (`types::market`)
//! - Error types: [`PricingError`](types::PricingError) (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional, enabled by default)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{MarketParameters, OptionType};
//!
//! let market = MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05).unwrap();
//! assert_eq!(market.spot(), 100.0);
//! assert!((market.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
//!
//! assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `MarketParameters` and `OptionType`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
