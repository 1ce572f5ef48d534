//! Core market and error types.
//!
//! This module provides:
//! - `market`: Immutable per-run market inputs and the call/put selector
//! - `error`: Structured error type for pricing operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`MarketParameters`], [`OptionType`] from `market`
//! - [`PricingError`] from `error`

pub mod error;
pub mod market;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use market::{MarketParameters, OptionType};
