//! SFC Money Engine CLI
//!
//! Runs the money system simulation and writes its histories as CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run --
//! cargo run -- --steps 240 --output-dir outputs
//! cargo run -- --config scenario.json --tax-rate 0.25
//! RUST_LOG=debug cargo run -- --steps 12
//! ```
//!
//! `stocks.csv`, `flows.csv` and `metrics.csv` are written to the output
//! directory and a one-line summary of the final step is printed to stdout.
//! Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid config, failed step, unwritable output, etc.)

use sfc_money_engine::cli;
use sfc_money_engine::io::write_results;
use sfc_money_engine::{Simulation, SimulationError};
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &cli::CliArgs) -> Result<(), SimulationError> {
    let config = args.to_model_config()?;
    let mut simulation = Simulation::new(config)?;
    let history = simulation.run()?;
    write_results(&args.output_dir, &history)?;

    if let Some(metrics) = history.metrics.last() {
        let summary: Vec<String> = metrics
            .iter()
            .map(|(name, value)| format!("{}={:.4}", name, value))
            .collect();
        println!("step {}: {}", history.len() - 1, summary.join(" "));
    }
    tracing::info!(output_dir = %args.output_dir.display(), "wrote results");
    Ok(())
}

fn main() {
    init_tracing();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "simulation failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
