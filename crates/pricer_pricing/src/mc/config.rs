//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for simulation
//! runs, the execution mode selector, and the time grid shared by every path.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 100_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 1_000;

/// Default number of paths handed to one worker task.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Execution strategy for path simulation.
///
/// Both modes honour the same contract; they differ only in scheduling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SimulationMode {
    /// One generator, paths simulated in order on the calling thread.
    Sequential,

    /// Paths partitioned into chunks, each chunk simulated by a worker with
    /// its own generator.
    #[default]
    Parallel,
}

impl SimulationMode {
    /// Returns the lowercase mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            SimulationMode::Sequential => "sequential",
            SimulationMode::Parallel => "parallel",
        }
    }
}

impl std::fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform time discretisation of `[0, T]`.
///
/// This is the only place the step size is computed: construct it once the
/// final step count is known.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 4).unwrap();
/// assert_eq!(grid.dt(), 0.25);
/// assert_eq!(grid.time_at(3), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    maturity: f64,
    n_steps: usize,
    dt: f64,
}

impl TimeGrid {
    /// Builds the grid for `n_steps` equal steps up to `maturity`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidStepCount(0)` if `n_steps` is zero
    /// - `ConfigError::InvalidParameter` if `maturity` is not finite and positive
    pub fn new(maturity: f64, n_steps: usize) -> Result<Self, ConfigError> {
        if n_steps == 0 {
            return Err(ConfigError::InvalidStepCount(n_steps));
        }
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "maturity",
                value: format!("{} (must be finite and positive)", maturity),
            });
        }
        Ok(Self {
            maturity,
            n_steps,
            dt: maturity / n_steps as f64,
        })
    }

    /// Returns the step size `T / n_steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the number of steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the horizon.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the time after step `step` (zero-based), i.e. `(step + 1) * dt`.
    #[inline]
    pub fn time_at(&self, step: usize) -> f64 {
        (step + 1) as f64 * self.dt
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// A path count of zero is representable so that the simulator can be asked
/// for an empty run; the pricer refuses it before simulating.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Number of time steps per path.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Paths per parallel task.
    chunk_size: usize,
    /// Dedicated worker count; `None` uses the global pool.
    threads: Option<usize>,
    /// Whether full trajectories are kept.
    retain_paths: bool,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of paths per parallel task.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the dedicated worker count, if any.
    #[inline]
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns whether the simulator keeps the full price matrix.
    #[inline]
    pub fn retain_paths(&self) -> bool {
        self.retain_paths
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is greater than [`MAX_PATHS`]
    /// - `n_steps` is 0 or greater than [`MAX_STEPS`]
    /// - `chunk_size` is 0
    /// - `threads` is `Some(0)`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chunk_size",
                value: "must be positive".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "threads",
                value: "must be positive".to_string(),
            });
        }
        if self.retain_paths && self.n_paths.checked_mul(self.n_steps).is_none() {
            return Err(ConfigError::InvalidParameter {
                name: "retain_paths",
                value: format!("{} x {} matrix overflows", self.n_paths, self.n_steps),
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)  // Daily steps for 1 year
///     .seed(12345)
///     .chunk_size(1_024)
///     .threads(4)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.threads(), Some(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    chunk_size: Option<usize>,
    threads: Option<usize>,
    retain_paths: bool,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in `[1, MAX_STEPS]`.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the run seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional run seed; `None` draws one from OS entropy per run.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of paths per parallel task.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Bounds parallel work to a dedicated pool of `threads` workers.
    #[inline]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Keeps every intermediate price, not just the terminal ones.
    #[inline]
    pub fn retain_paths(mut self, retain: bool) -> Self {
        self.retain_paths = retain;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` not set or invalid
    /// - `n_steps` not set or invalid
    /// - `chunk_size` or `threads` is zero
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            n_steps,
            seed: self.seed,
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            threads: self.threads,
            retain_paths: self.retain_paths,
        };

        config.validate()?;
        Ok(config)
    }
}
