//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! using the exact log-space step:
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! Each path consumes exactly `n_steps` shocks from its source.
//!
//! # Parallel Layout
//!
//! Output buffers are sized up front. In parallel mode they are split into
//! disjoint chunks of `chunk_size` paths; chunk `i` is simulated by one task
//! using the generator for stream ordinal `i + 1` of the run's
//! [`SeedSequence`]. Sequential mode uses stream ordinal `0` for every path.
//! Results therefore depend only on the run seed and chunk size, never on the
//! number of worker threads.
//!
//! # Memory Layout
//!
//! Retained trajectories are stored path-major:
//! `data[path_idx * n_steps + step_idx]`. The initial spot is not stored.

use pricer_core::types::MarketParameters;
use pricer_models::models::GbmStep;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::{MonteCarloConfig, SimulationMode, TimeGrid};
use super::error::ConfigError;
use crate::rng::{SeedSequence, ShockSource};

/// Full grid of simulated prices, `n_steps` rows by `n_paths` columns.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::mc::{simulate, MonteCarloConfig, SimulationMode};
///
/// let market = MarketParameters::default();
/// let config = MonteCarloConfig::builder()
///     .n_paths(8)
///     .n_steps(5)
///     .seed(1)
///     .retain_paths(true)
///     .build()
///     .unwrap();
///
/// let output = simulate(&market, &config, SimulationMode::Sequential).unwrap();
/// let matrix = output.matrix.as_ref().unwrap();
/// assert_eq!(matrix.price(4, 3), output.final_prices[3]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceMatrix {
    n_steps: usize,
    n_paths: usize,
    data: Vec<f64>,
}

impl PriceMatrix {
    fn zeros(n_steps: usize, n_paths: usize) -> Self {
        Self {
            n_steps,
            n_paths,
            data: vec![0.0; n_steps * n_paths],
        }
    }

    /// Number of steps (rows).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of paths (columns).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Price of path `path` after step `step`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn price(&self, step: usize, path: usize) -> f64 {
        assert!(step < self.n_steps, "step {} out of range", step);
        self.data[path * self.n_steps + step]
    }

    /// Whole trajectory of one path, excluding the initial spot.
    #[inline]
    pub fn path(&self, path: usize) -> &[f64] {
        let start = path * self.n_steps;
        &self.data[start..start + self.n_steps]
    }

    /// Prices of every path after step `step`, in path order.
    pub fn step_prices(&self, step: usize) -> impl Iterator<Item = f64> + '_ {
        self.data
            .iter()
            .skip(step)
            .step_by(self.n_steps.max(1))
            .copied()
    }
}

/// Result of one simulation run.
#[derive(Clone, Debug)]
pub struct SimulationOutput {
    /// Terminal price of each path, indexed by path.
    pub final_prices: Vec<f64>,
    /// Every intermediate price, when retention was requested.
    pub matrix: Option<PriceMatrix>,
    /// The grid the run was discretised on.
    pub grid: TimeGrid,
    /// Seed the run was rooted at (drawn from entropy when none was given).
    pub run_seed: u64,
}

/// Simulates one path, returning its terminal price.
///
/// Draws exactly `n_steps` shocks from `shocks`.
#[inline]
pub fn simulate_path<S: ShockSource>(
    step: &GbmStep<f64>,
    spot: f64,
    n_steps: usize,
    shocks: &mut S,
) -> f64 {
    let mut price = spot;
    for _ in 0..n_steps {
        price = step.advance(price, shocks.next_shock());
    }
    price
}

/// Simulates one path into `trajectory`, one entry per step.
///
/// Draws exactly `trajectory.len()` shocks and returns the terminal price
/// (the spot itself for an empty trajectory).
#[inline]
pub fn simulate_path_into<S: ShockSource>(
    step: &GbmStep<f64>,
    spot: f64,
    shocks: &mut S,
    trajectory: &mut [f64],
) -> f64 {
    let mut price = spot;
    for slot in trajectory.iter_mut() {
        price = step.advance(price, shocks.next_shock());
        *slot = price;
    }
    price
}

/// Simulates `config.n_paths()` GBM paths under the risk-neutral drift.
///
/// Returns one terminal price per path; when the configuration asks for it,
/// the full [`PriceMatrix`] as well. A run with zero paths returns empty
/// outputs.
///
/// Parallel work runs on whichever rayon pool is current; see
/// [`MonteCarloPricer`](super::MonteCarloPricer) for a bounded dedicated pool.
///
/// # Errors
///
/// Returns `ConfigError` if the configuration or time grid is invalid. No path
/// is simulated in that case.
pub fn simulate(
    market: &MarketParameters,
    config: &MonteCarloConfig,
    mode: SimulationMode,
) -> Result<SimulationOutput, ConfigError> {
    config.validate()?;
    let grid = TimeGrid::new(market.maturity(), config.n_steps())?;
    let seeds = config
        .seed()
        .map(SeedSequence::new)
        .unwrap_or_else(SeedSequence::from_entropy);

    let n_paths = config.n_paths();
    let n_steps = grid.n_steps();
    // Never larger than the run, so `chunk * n_steps` stays within the matrix size
    let chunk = config.chunk_size().min(n_paths.max(1));
    let step = GbmStep::new(market.rate(), market.volatility(), grid.dt());
    let spot = market.spot();

    debug!(
        n_paths,
        n_steps,
        %mode,
        dt = grid.dt(),
        run_seed = seeds.run_seed(),
        retain = config.retain_paths(),
        "starting path simulation"
    );

    let mut final_prices = vec![0.0; n_paths];
    let mut matrix = config
        .retain_paths()
        .then(|| PriceMatrix::zeros(n_steps, n_paths));

    match (mode, matrix.as_mut()) {
        (SimulationMode::Sequential, None) => {
            let mut rng = seeds.stream(0);
            for terminal in final_prices.iter_mut() {
                *terminal = simulate_path(&step, spot, n_steps, &mut rng);
            }
        }
        (SimulationMode::Sequential, Some(matrix)) => {
            let mut rng = seeds.stream(0);
            for (terminal, row) in final_prices
                .iter_mut()
                .zip(matrix.data.chunks_mut(n_steps))
            {
                *terminal = simulate_path_into(&step, spot, &mut rng, row);
            }
        }
        (SimulationMode::Parallel, None) => {
            final_prices
                .par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(index, out)| {
                    let mut rng = seeds.stream(index as u64 + 1);
                    trace!(chunk = index, paths = out.len(), "simulating chunk");
                    for terminal in out.iter_mut() {
                        *terminal = simulate_path(&step, spot, n_steps, &mut rng);
                    }
                });
        }
        (SimulationMode::Parallel, Some(matrix)) => {
            final_prices
                .par_chunks_mut(chunk)
                .zip(matrix.data.par_chunks_mut(chunk * n_steps))
                .enumerate()
                .for_each(|(index, (out, rows))| {
                    let mut rng = seeds.stream(index as u64 + 1);
                    trace!(chunk = index, paths = out.len(), "simulating chunk");
                    for (terminal, row) in out.iter_mut().zip(rows.chunks_mut(n_steps)) {
                        *terminal = simulate_path_into(&step, spot, &mut rng, row);
                    }
                });
        }
    }

    Ok(SimulationOutput {
        final_prices,
        matrix,
        grid,
        run_seed: seeds.run_seed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Returns a fixed shock and counts how often it was asked.
    struct CountingShocks {
        value: f64,
        draws: usize,
    }

    impl ShockSource for CountingShocks {
        fn next_shock(&mut self) -> f64 {
            self.draws += 1;
            self.value
        }
    }

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.2, 0.05).unwrap()
    }

    fn config(n_paths: usize, n_steps: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .seed(42)
            .chunk_size(64)
            .build()
            .unwrap()
    }

    // ==========================================================
    // Single Path Tests
    // ==========================================================

    #[test]
    fn test_one_draw_per_step() {
        let step = GbmStep::new(0.05, 0.2, 0.01);
        let mut shocks = CountingShocks {
            value: 0.3,
            draws: 0,
        };

        simulate_path(&step, 100.0, 37, &mut shocks);
        assert_eq!(shocks.draws, 37);

        let mut trajectory = vec![0.0; 12];
        simulate_path_into(&step, 100.0, &mut shocks, &mut trajectory);
        assert_eq!(shocks.draws, 37 + 12);
    }

    #[test]
    fn test_zero_shocks_follow_drift() {
        // With Z = 0 every step multiplies by exp((r - σ²/2) dt)
        let (r, sigma, t, n) = (0.05, 0.2, 1.0, 50);
        let step = GbmStep::new(r, sigma, t / n as f64);
        let mut shocks = CountingShocks {
            value: 0.0,
            draws: 0,
        };

        let terminal = simulate_path(&step, 100.0, n, &mut shocks);
        assert_relative_eq!(
            terminal,
            100.0 * ((r - 0.5 * sigma * sigma) * t).exp(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_trajectory_matches_terminal() {
        let step = GbmStep::new(0.05, 0.2, 0.1);
        let mut a = SeedSequence::new(3).stream(0);
        let mut b = SeedSequence::new(3).stream(0);

        let mut trajectory = vec![0.0; 10];
        let terminal = simulate_path_into(&step, 100.0, &mut a, &mut trajectory);

        assert_eq!(terminal, trajectory[9]);
        assert_eq!(terminal, simulate_path(&step, 100.0, 10, &mut b));
    }

    // ==========================================================
    // Simulator Tests
    // ==========================================================

    #[test]
    fn test_output_shape() {
        for mode in [SimulationMode::Sequential, SimulationMode::Parallel] {
            let output = simulate(&market(), &config(1_000, 20), mode).unwrap();
            assert_eq!(output.final_prices.len(), 1_000);
            assert!(output.matrix.is_none());
            assert_eq!(output.run_seed, 42);
            assert!(output
                .final_prices
                .iter()
                .all(|&s| s > 0.0 && s.is_finite()));
        }
    }

    #[test]
    fn test_zero_paths_is_empty() {
        for mode in [SimulationMode::Sequential, SimulationMode::Parallel] {
            let output = simulate(&market(), &config(0, 20), mode).unwrap();
            assert!(output.final_prices.is_empty());
        }
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let market = MarketParameters::new(100.0, 100.0, 2.0, 0.0, 0.03).unwrap();
        let output = simulate(&market, &config(100, 10), SimulationMode::Parallel).unwrap();
        let expected = 100.0 * (0.03_f64 * 2.0).exp();
        for &s in &output.final_prices {
            assert_relative_eq!(s, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_fixed_seed_reproducible() {
        for mode in [SimulationMode::Sequential, SimulationMode::Parallel] {
            let a = simulate(&market(), &config(500, 30), mode).unwrap();
            let b = simulate(&market(), &config(500, 30), mode).unwrap();
            assert_eq!(a.final_prices, b.final_prices);
        }
    }

    #[test]
    fn test_parallel_independent_of_thread_count() {
        let cfg = config(1_000, 25);
        let run = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| simulate(&market(), &cfg, SimulationMode::Parallel).unwrap())
        };

        assert_eq!(run(1).final_prices, run(4).final_prices);
    }

    #[test]
    fn test_chunks_use_distinct_streams() {
        // With shared generators the first path of every chunk would coincide
        let output = simulate(&market(), &config(640, 5), SimulationMode::Parallel).unwrap();
        let firsts: Vec<f64> = output.final_prices.iter().step_by(64).copied().collect();
        for (i, a) in firsts.iter().enumerate() {
            for b in &firsts[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_entropy_seed_reported() {
        let cfg = MonteCarloConfig::builder()
            .n_paths(10)
            .n_steps(5)
            .build()
            .unwrap();
        let first = simulate(&market(), &cfg, SimulationMode::Sequential).unwrap();

        let replay_cfg = MonteCarloConfig::builder()
            .n_paths(10)
            .n_steps(5)
            .seed(first.run_seed)
            .build()
            .unwrap();
        let replay = simulate(&market(), &replay_cfg, SimulationMode::Sequential).unwrap();

        assert_eq!(first.final_prices, replay.final_prices);
    }

    // ==========================================================
    // PriceMatrix Tests
    // ==========================================================

    #[test]
    fn test_matrix_matches_final_prices() {
        for mode in [SimulationMode::Sequential, SimulationMode::Parallel] {
            let cfg = MonteCarloConfig::builder()
                .n_paths(200)
                .n_steps(12)
                .seed(9)
                .chunk_size(16)
                .retain_paths(true)
                .build()
                .unwrap();
            let output = simulate(&market(), &cfg, mode).unwrap();
            let matrix = output.matrix.as_ref().unwrap();

            assert_eq!(matrix.n_steps(), 12);
            assert_eq!(matrix.n_paths(), 200);
            for (p, &terminal) in output.final_prices.iter().enumerate() {
                assert_eq!(matrix.price(11, p), terminal);
                assert_eq!(matrix.path(p).len(), 12);
            }
        }
    }

    #[test]
    fn test_retention_does_not_change_terminals() {
        let plain = simulate(&market(), &config(300, 8), SimulationMode::Parallel).unwrap();
        let cfg = MonteCarloConfig::builder()
            .n_paths(300)
            .n_steps(8)
            .seed(42)
            .chunk_size(64)
            .retain_paths(true)
            .build()
            .unwrap();
        let retained = simulate(&market(), &cfg, SimulationMode::Parallel).unwrap();

        assert_eq!(plain.final_prices, retained.final_prices);
    }

    #[test]
    fn test_step_prices_column_order() {
        let cfg = MonteCarloConfig::builder()
            .n_paths(5)
            .n_steps(3)
            .seed(1)
            .retain_paths(true)
            .build()
            .unwrap();
        let output = simulate(&market(), &cfg, SimulationMode::Sequential).unwrap();
        let matrix = output.matrix.unwrap();

        let row: Vec<f64> = matrix.step_prices(1).collect();
        assert_eq!(row.len(), 5);
        for (p, &s) in row.iter().enumerate() {
            assert_eq!(s, matrix.price(1, p));
        }
    }

    #[test]
    fn test_zero_steps_never_reach_simulator() {
        let bad = MonteCarloConfig::builder().n_paths(10).n_steps(0).build();
        assert!(matches!(bad, Err(ConfigError::InvalidStepCount(0))));
    }
}
