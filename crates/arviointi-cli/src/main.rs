//! Auton Arviointi - car trade-in valuation from a photo using AI
//!
//! A CLI tool that sends a photo of a car to a generative model and shows
//! the estimated trade-in range, a derived retail price and the full report.

mod cli;
mod commands;
mod output;
mod prompt;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
