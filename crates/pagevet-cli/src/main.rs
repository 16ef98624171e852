//! pagevet - visit URLs in a real browser and count error signals.
//!
//! This is the entry point for the pagevet CLI. It parses arguments,
//! initializes logging, hands the validated configuration to the library
//! and maps the aggregate error count to the exit code: 0 when no URL
//! produced an error, 1 otherwise.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

mod cli;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    // Configuration problems abort before any browser work begins.
    let config = args.to_config().context("invalid configuration")?;

    let errors = pagevet::run(&config)
        .await
        .context("smoke check aborted")?;

    Ok(if errors > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
