//! Suelo CLI - Command-line interface
//!
//! This is the driving adapter for the scoring engine and the report store.

mod cli;
mod commands;
mod context;
mod errors;
mod output;
mod output_types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use errors::CliError;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new()?;

    // Execute the command
    match runtime.block_on(commands::execute(cli)) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<CliError>() {
            Some(cli_err) => {
                cli_err.display();
                std::process::exit(1);
            }
            None => Err(err),
        },
    }
}
