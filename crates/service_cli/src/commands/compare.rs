//! Compare command implementation
//!
//! Prices the same inputs sequentially and in parallel, timing each run.

use std::io::Write;
use std::time::{Duration, Instant};

use pricer_pricing::mc::{MonteCarloPricer, PricingResult, SimulationMode};
use tracing::info;

use crate::config::AppConfig;
use crate::Result;

/// One timed pricing run
#[derive(Debug, Clone)]
pub struct TimedRun {
    /// Pricing outcome
    pub result: PricingResult,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

/// Price with `mode` and measure wall-clock time
pub fn timed(
    pricer: &MonteCarloPricer,
    config: &AppConfig,
    mode: SimulationMode,
) -> Result<TimedRun> {
    let start = Instant::now();
    let result = pricer.price(&config.market, mode)?;
    let elapsed = start.elapsed();
    info!("  {} run: {:.2?}", mode, elapsed);
    Ok(TimedRun { result, elapsed })
}

/// Run the compare command
pub fn run(config: &AppConfig) -> Result<()> {
    info!(
        "Comparing execution modes on {} paths x {} steps",
        config.simulation.paths, config.simulation.steps
    );

    let pricer = MonteCarloPricer::new(config.monte_carlo_config(false)?)?;
    let sequential = timed(&pricer, config, SimulationMode::Sequential)?;
    let parallel = timed(&pricer, config, SimulationMode::Parallel)?;

    let stdout = std::io::stdout();
    write_comparison(&mut stdout.lock(), &sequential, &parallel)?;
    Ok(())
}

/// Sequential time divided by parallel time
pub fn speed_up(sequential: Duration, parallel: Duration) -> f64 {
    let par = parallel.as_secs_f64();
    if par > 0.0 {
        sequential.as_secs_f64() / par
    } else {
        f64::INFINITY
    }
}

/// Render both runs side by side
pub fn write_comparison<W: Write>(
    out: &mut W,
    sequential: &TimedRun,
    parallel: &TimedRun,
) -> Result<()> {
    let bs = sequential.result.analytical;
    writeln!(out, "\n┌────────────┬────────────┬────────────┬────────────┐")?;
    writeln!(out, "│ Mode       │ Call       │ Put        │ Time (ms)  │")?;
    writeln!(out, "├────────────┼────────────┼────────────┼────────────┤")?;
    for run in [sequential, parallel] {
        writeln!(
            out,
            "│ {:<10} │ {:>10.4} │ {:>10.4} │ {:>10.1} │",
            run.result.mode.as_str(),
            run.result.call.price,
            run.result.put.price,
            run.elapsed.as_secs_f64() * 1e3
        )?;
    }
    writeln!(
        out,
        "│ {:<10} │ {:>10.4} │ {:>10.4} │ {:>10} │",
        "analytical", bs.call, bs.put, "-"
    )?;
    writeln!(out, "└────────────┴────────────┴────────────┴────────────┘")?;
    writeln!(
        out,
        "Speed-up: {:.2}x",
        speed_up(sequential.elapsed, parallel.elapsed)
    )?;
    Ok(())
}
