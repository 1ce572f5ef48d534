//! Export command implementation
//!
//! Simulates with full path retention and writes the price grid as CSV for
//! plotting.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use pricer_pricing::mc::{MonteCarloPricer, SimulationMode};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::export::{write_paths, Columns};
use crate::{CliError, Result};

/// Run the export command
pub fn run(
    config: &AppConfig,
    mode: SimulationMode,
    output: &Path,
    batch_size: Option<usize>,
    max_columns: usize,
) -> Result<()> {
    info!("Exporting simulated paths...");
    info!("  Output: {}", output.display());

    let pricer = MonteCarloPricer::new(config.monte_carlo_config(true)?)?;
    let simulated = pricer.simulate(&config.market, mode)?;
    let matrix = simulated
        .matrix
        .as_ref()
        .ok_or_else(|| CliError::InvalidArgument("simulation did not retain paths".to_string()))?;

    let columns = match batch_size {
        Some(n) => Columns::Batched(n),
        None => Columns::limited_to(matrix.n_paths(), max_columns),
    };
    if let Columns::Batched(n) = columns {
        if batch_size.is_none() {
            warn!(
                "{} paths exceed {} columns; averaging groups of {}",
                matrix.n_paths(),
                max_columns,
                n
            );
        }
    }

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = BufWriter::new(File::create(output)?);
    let written = write_paths(file, matrix, &simulated.grid, config.market.spot(), columns)?;

    info!(
        "Wrote {} rows x {} price columns (run seed {})",
        matrix.n_steps() + 1,
        written,
        simulated.run_seed
    );
    Ok(())
}
