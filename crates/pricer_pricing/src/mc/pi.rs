//! Monte Carlo estimate of π.
//!
//! Samples points uniformly in the unit square and counts those inside the
//! quarter circle `x² + y² <= 1`; `π ≈ 4 × inside / total`. Useful as a quick
//! sanity check of the generator and the chunked parallel scheduler.

use rayon::prelude::*;
use tracing::debug;

use super::config::SimulationMode;
use super::error::ConfigError;
use crate::rng::{PricerRng, SeedSequence};

/// Result of a π estimation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiEstimate {
    /// The estimate `4 × inside / n_points`.
    pub value: f64,
    /// Points that fell inside the quarter circle.
    pub inside: u64,
    /// Total points sampled.
    pub n_points: u64,
}

impl PiEstimate {
    /// Binomial standard error of the estimate.
    pub fn std_error(&self) -> f64 {
        let p = self.inside as f64 / self.n_points as f64;
        4.0 * (p * (1.0 - p) / self.n_points as f64).sqrt()
    }
}

#[inline]
fn count_inside(rng: &mut PricerRng, n: u64) -> u64 {
    let mut inside = 0;
    for _ in 0..n {
        let x = rng.gen_uniform();
        let y = rng.gen_uniform();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    inside
}

/// Estimates π from `n_points` uniform samples.
///
/// Parallel mode splits the points into chunks of `chunk_size`, each sampled
/// from its own stream of `seeds`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidParameter` if `n_points` or `chunk_size` is zero.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{estimate_pi, SimulationMode};
/// use pricer_pricing::rng::SeedSequence;
///
/// let estimate = estimate_pi(100_000, SeedSequence::new(1), SimulationMode::Parallel, 4_096)
///     .unwrap();
/// assert!((estimate.value - std::f64::consts::PI).abs() < 0.05);
/// ```
pub fn estimate_pi(
    n_points: u64,
    seeds: SeedSequence,
    mode: SimulationMode,
    chunk_size: u64,
) -> Result<PiEstimate, ConfigError> {
    if n_points == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "n_points",
            value: "must be positive".to_string(),
        });
    }
    if chunk_size == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "chunk_size",
            value: "must be positive".to_string(),
        });
    }

    debug!(n_points, %mode, run_seed = seeds.run_seed(), "estimating pi");

    let inside = match mode {
        SimulationMode::Sequential => count_inside(&mut seeds.stream(0), n_points),
        SimulationMode::Parallel => {
            let n_chunks = n_points.div_ceil(chunk_size);
            (0..n_chunks)
                .into_par_iter()
                .map(|index| {
                    let start = index * chunk_size;
                    let len = chunk_size.min(n_points - start);
                    count_inside(&mut seeds.stream(index + 1), len)
                })
                .sum()
        }
    };

    Ok(PiEstimate {
        value: 4.0 * inside as f64 / n_points as f64,
        inside,
        n_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_estimate_converges() {
        for mode in [SimulationMode::Sequential, SimulationMode::Parallel] {
            let estimate = estimate_pi(1_000_000, SeedSequence::new(42), mode, 10_000).unwrap();
            // std_error ~ 0.0016 at one million points
            assert!(
                (estimate.value - PI).abs() < 5.0 * estimate.std_error(),
                "{} estimate {} too far from pi",
                mode,
                estimate.value
            );
        }
    }

    #[test]
    fn test_counts_consistent() {
        let estimate =
            estimate_pi(12_345, SeedSequence::new(1), SimulationMode::Parallel, 1_000).unwrap();
        assert_eq!(estimate.n_points, 12_345);
        assert!(estimate.inside <= estimate.n_points);
        assert_eq!(estimate.value, 4.0 * estimate.inside as f64 / 12_345.0);
    }

    #[test]
    fn test_reproducible() {
        let a = estimate_pi(50_000, SeedSequence::new(3), SimulationMode::Parallel, 512).unwrap();
        let b = estimate_pi(50_000, SeedSequence::new(3), SimulationMode::Parallel, 512).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_points_rejected() {
        let result = estimate_pi(0, SeedSequence::new(1), SimulationMode::Sequential, 10);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "n_points", .. })
        ));
    }
}
