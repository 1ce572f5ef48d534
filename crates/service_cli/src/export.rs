//! CSV rendering of simulated price paths
//!
//! Layout: a `time` column followed by one column per path (`path_0`, ...) or,
//! when batching, one column per group of consecutive paths holding the
//! group's average price (`batch_0`, ...). The first row is `t = 0` with every
//! column at the initial spot; row `k` is the price after step `k`.

use std::io::Write;

use pricer_pricing::mc::{PriceMatrix, TimeGrid};

use crate::{CliError, Result};

/// Column layout for the exported grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// One column per path
    PerPath,
    /// Average of each group of `n` consecutive paths; the last group may be smaller
    Batched(usize),
}

impl Columns {
    /// Picks a layout that keeps at most `max_columns` price columns
    pub fn limited_to(n_paths: usize, max_columns: usize) -> Self {
        if max_columns == 0 || n_paths <= max_columns {
            Columns::PerPath
        } else {
            Columns::Batched(n_paths.div_ceil(max_columns))
        }
    }
}

fn column_ranges(n_paths: usize, columns: Columns) -> Vec<std::ops::Range<usize>> {
    let width = match columns {
        Columns::PerPath => 1,
        Columns::Batched(n) => n,
    };
    (0..n_paths)
        .step_by(width)
        .map(|start| start..(start + width).min(n_paths))
        .collect()
}

/// Write `matrix` as CSV to `writer`
///
/// Returns the number of price columns written.
pub fn write_paths<W: Write>(
    writer: W,
    matrix: &PriceMatrix,
    grid: &TimeGrid,
    spot: f64,
    columns: Columns,
) -> Result<usize> {
    if let Columns::Batched(0) = columns {
        return Err(CliError::InvalidArgument(
            "batch size must be positive".to_string(),
        ));
    }

    let ranges = column_ranges(matrix.n_paths(), columns);
    let prefix = match columns {
        Columns::PerPath => "path",
        Columns::Batched(_) => "batch",
    };

    let mut csv = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(ranges.len() + 1);
    header.push("time".to_string());
    header.extend((0..ranges.len()).map(|i| format!("{}_{}", prefix, i)));
    csv.write_record(&header)?;

    let mut row = Vec::with_capacity(ranges.len() + 1);
    row.push("0".to_string());
    row.extend(ranges.iter().map(|_| spot.to_string()));
    csv.write_record(&row)?;

    for step in 0..matrix.n_steps() {
        row.clear();
        row.push(grid.time_at(step).to_string());
        for range in &ranges {
            let sum: f64 = range.clone().map(|p| matrix.price(step, p)).sum();
            row.push((sum / range.len() as f64).to_string());
        }
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(ranges.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::MarketParameters;
    use pricer_pricing::mc::{simulate, MonteCarloConfig, SimulationMode, SimulationOutput};

    fn simulated(n_paths: usize, n_steps: usize) -> (SimulationOutput, MarketParameters) {
        let market = MarketParameters::default();
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .seed(42)
            .retain_paths(true)
            .build()
            .unwrap();
        (
            simulate(&market, &config, SimulationMode::Sequential).unwrap(),
            market,
        )
    }

    fn export(output: &SimulationOutput, spot: f64, columns: Columns) -> (usize, String) {
        let mut buffer = Vec::new();
        let written = write_paths(
            &mut buffer,
            output.matrix.as_ref().unwrap(),
            &output.grid,
            spot,
            columns,
        )
        .unwrap();
        (written, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_per_path_layout() {
        let (output, market) = simulated(3, 4);
        let (written, text) = export(&output, market.spot(), Columns::PerPath);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(written, 3);
        assert_eq!(lines.len(), 1 + 1 + 4);
        assert_eq!(lines[0], "time,path_0,path_1,path_2");
        assert_eq!(lines[1], "0,100,100,100");

        let last: Vec<f64> = lines[5].split(',').map(|v| v.parse().unwrap()).collect();
        assert_relative_eq!(last[0], 1.0, epsilon = 1e-12);
        for p in 0..3 {
            assert_eq!(last[p + 1], output.final_prices[p]);
        }
    }

    #[test]
    fn test_batched_layout_averages() {
        let (output, market) = simulated(5, 2);
        let (written, text) = export(&output, market.spot(), Columns::Batched(2));
        let lines: Vec<&str> = text.lines().collect();

        // Groups {0,1}, {2,3}, {4}
        assert_eq!(written, 3);
        assert_eq!(lines[0], "time,batch_0,batch_1,batch_2");

        let last: Vec<f64> = lines[3].split(',').map(|v| v.parse().unwrap()).collect();
        let f = &output.final_prices;
        assert_relative_eq!(last[1], (f[0] + f[1]) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(last[2], (f[2] + f[3]) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(last[3], f[4], epsilon = 1e-9);
    }

    #[test]
    fn test_zero_batch_rejected() {
        let (output, _) = simulated(2, 2);
        let result = write_paths(
            Vec::new(),
            output.matrix.as_ref().unwrap(),
            &output.grid,
            100.0,
            Columns::Batched(0),
        );
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_columns_limited_to() {
        assert_eq!(Columns::limited_to(50, 100), Columns::PerPath);
        assert_eq!(Columns::limited_to(100, 100), Columns::PerPath);
        assert_eq!(Columns::limited_to(101, 100), Columns::Batched(2));
        assert_eq!(Columns::limited_to(100_000, 100), Columns::Batched(1000));
        assert_eq!(Columns::limited_to(100_000, 0), Columns::PerPath);
    }
}
