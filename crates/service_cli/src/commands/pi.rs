//! Pi command implementation
//!
//! Estimates π by sampling the unit square.

use pricer_pricing::mc::{estimate_pi, McError, SimulationMode};
use pricer_pricing::rng::SeedSequence;
use tracing::info;

use crate::Result;

/// Run the pi command
pub fn run(points: u64, seed: Option<u64>, mode: SimulationMode, chunk_size: u64) -> Result<()> {
    let seeds = seed
        .map(SeedSequence::new)
        .unwrap_or_else(SeedSequence::from_entropy);
    info!(
        "Estimating pi from {} points ({}, seed {})",
        points,
        mode,
        seeds.run_seed()
    );

    let estimate = estimate_pi(points, seeds, mode, chunk_size).map_err(McError::from)?;

    println!(
        "The approximate value of pi is: {:.6} (+/- {:.6}, error {:+.6})",
        estimate.value,
        1.96 * estimate.std_error(),
        estimate.value - std::f64::consts::PI
    );
    Ok(())
}
