//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod compare;
pub mod export;
pub mod pi;
pub mod price;
