//! Command line entry point for headless steering runs.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use steer::{init_logging, Scenario};

/// Runs a steering scenario headless and prints one JSON sample per step
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario description in JSON
    scenario: PathBuf,

    /// Override the number of steps to simulate
    #[arg(long)]
    steps: Option<u32>,

    /// Override the fixed step length in seconds
    #[arg(long)]
    dt: Option<f32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    if let Some(steps) = args.steps {
        scenario.steps = steps;
    }
    if let Some(dt) = args.dt {
        scenario.dt = dt;
    }

    let mut out = BufWriter::new(io::stdout().lock());
    let steps = steer::scenario::stream(&scenario, |sample| {
        serde_json::to_writer(&mut out, sample)?;
        writeln!(out)
    })
    .context("running scenario")?;
    out.flush().context("flushing output")?;
    info!("simulated {steps} steps");
    Ok(())
}
