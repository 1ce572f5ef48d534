//! Interactive parameter entry
//!
//! Asks for the five market parameters and the path/step counts one line at
//! a time. An empty line (or end of input) keeps the value shown in brackets.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use pricer_core::types::MarketParameters;

use crate::config::AppConfig;
use crate::{CliError, Result};

fn ask<T, R, W>(input: &mut R, output: &mut W, question: &str, current: T) -> Result<T>
where
    T: FromStr + Display,
    R: BufRead,
    W: Write,
{
    write!(output, "{} [{}]: ", question, current)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(current);
    }
    answer.parse().map_err(|_| {
        CliError::InvalidArgument(format!("'{}' is not a valid value for: {}", answer, question))
    })
}

/// Prompt for every run parameter, starting from `config`
pub fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: AppConfig,
) -> Result<AppConfig> {
    let m = config.market;
    let spot = ask(input, output, "Enter the current asset price", m.spot())?;
    let strike = ask(input, output, "Enter the strike price", m.strike())?;
    let maturity = ask(
        input,
        output,
        "Enter the time to expiration (in years, e.g., 0.5 for 6 months)",
        m.maturity(),
    )?;
    let volatility = ask(
        input,
        output,
        "Enter the volatility (as a decimal, e.g., 0.2 for 20%)",
        m.volatility(),
    )?;
    let rate = ask(
        input,
        output,
        "Enter the risk-free interest rate (as a decimal, e.g., 0.05 for 5%)",
        m.rate(),
    )?;

    writeln!(output, "Algorithm Tuning Parameters:")?;
    let paths = ask(
        input,
        output,
        "Enter the number of simulation paths (e.g., 100000)",
        config.simulation.paths,
    )?;
    let steps = ask(
        input,
        output,
        "Enter the number of time steps per path (e.g., 252)",
        config.simulation.steps,
    )?;

    let mut config = config;
    config.market = MarketParameters::new(spot, strike, maturity, volatility, rate)?;
    config.simulation.paths = paths;
    config.simulation.steps = steps;
    config.normalise()
}
