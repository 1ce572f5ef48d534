//! Price command implementation
//!
//! Prices a European call and put with the Monte Carlo engine and prints them
//! next to the Black-Scholes reference.

use std::io::Write;

use pricer_pricing::mc::{MonteCarloPricer, PricingResult, SimulationMode};
use tracing::info;

use crate::config::AppConfig;
use crate::{CliError, Result};

/// Run the price command
pub fn run(config: &AppConfig, mode: SimulationMode, format: &str) -> Result<()> {
    let market = &config.market;
    info!("Starting pricing...");
    info!(
        "  Market: S0={} K={} T={} sigma={} r={}",
        market.spot(),
        market.strike(),
        market.maturity(),
        market.volatility(),
        market.rate()
    );
    info!(
        "  Paths: {}, steps: {}, mode: {}",
        config.simulation.paths, config.simulation.steps, mode
    );

    let pricer = MonteCarloPricer::new(config.monte_carlo_config(false)?)?;
    let mc = pricer.config();
    info!(
        "  Chunk size: {}, threads: {}",
        mc.chunk_size(),
        mc.threads()
            .map_or_else(|| "rayon default".to_string(), |n| n.to_string())
    );
    let result = pricer.price(market, mode)?;
    info!("  Run seed: {}", result.run_seed);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        "json" => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        "table" => write_table(&mut out, &result)?,
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    info!("Pricing complete");
    Ok(())
}

/// Render `result` as a results table
pub fn write_table<W: Write>(out: &mut W, result: &PricingResult) -> Result<()> {
    writeln!(
        out,
        "\nMonte Carlo ({} paths x {} steps, {}, seed {})",
        result.n_paths, result.n_steps, result.mode, result.run_seed
    )?;
    writeln!(out, "┌────────┬────────────┬────────────┬────────────┬────────────┐")?;
    writeln!(out, "│ Option │ MC price   │ Std error  │ BS price   │ Difference │")?;
    writeln!(out, "├────────┼────────────┼────────────┼────────────┼────────────┤")?;
    writeln!(
        out,
        "│ Call   │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>+10.4} │",
        result.call.price,
        result.call.std_error,
        result.analytical.call,
        result.call_error()
    )?;
    writeln!(
        out,
        "│ Put    │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>+10.4} │",
        result.put.price,
        result.put.std_error,
        result.analytical.put,
        result.put_error()
    )?;
    writeln!(out, "└────────┴────────────┴────────────┴────────────┴────────────┘")?;
    writeln!(
        out,
        "95% CI: call {:.4} ± {:.4}, put {:.4} ± {:.4}",
        result.call.price,
        result.call.confidence_95(),
        result.put.price,
        result.put.confidence_95()
    )?;
    Ok(())
}
