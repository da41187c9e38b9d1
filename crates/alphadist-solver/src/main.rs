// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Alphadist CLI - density bounds for distance graphs.

use alphadist_model::generators::GeneratorSet;
use alphadist_solver::{
    report,
    sweep::{DensitySweep, SweepConfig},
};
use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "alphadist")]
#[command(version, about = "Independence numbers and densities of distance graphs", long_about = None)]
struct Cli {
    /// Forbidden distances, e.g. `-g 1 4`
    #[arg(short = 'g', long = "gens", num_args = 1.., required = true)]
    gens: Vec<usize>,

    /// Largest modulus to test; intervals go up to twice this length
    #[arg(short = 'N', long = "max-modulus")]
    max_modulus: usize,

    /// Smallest modulus to test for cycles
    #[arg(short = 'n', long = "min-modulus", default_value_t = 1)]
    min_modulus: usize,

    /// Total time budget in seconds
    #[arg(short = 'k', long = "time-limit")]
    time_limit: Option<f64>,

    /// Seconds between progress lines during long searches
    #[arg(long = "log-interval")]
    log_interval: Option<f64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn seconds(value: f64, flag: &str) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("invalid duration for {}: {}", flag, value))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let generators = GeneratorSet::new(cli.gens).context("invalid generator set")?;

    let mut config = SweepConfig::new(generators.clone(), cli.max_modulus)
        .with_min_modulus(cli.min_modulus);
    if let Some(limit) = cli.time_limit {
        config = config.with_time_limit(seconds(limit, "--time-limit")?);
    }
    if let Some(interval) = cli.log_interval {
        config = config.with_log_interval(seconds(interval, "--log-interval")?);
    }

    tracing::info!(
        generators = %generators,
        max_modulus = config.max_modulus(),
        capacity = config.capacity(),
        "starting density sweep"
    );

    let mut sweep = DensitySweep::new(config);
    let summary = sweep
        .run(|event| println!("{}", report::event_line(&generators, event)))
        .context("density sweep failed")?;

    tracing::info!(stop_reason = %summary.stop_reason(), "density sweep stopped");

    println!("{}", report::upper_density_line(&generators, summary.upper()));
    println!("{}", report::lower_density_line(&generators, summary.lower()));

    Ok(())
}
