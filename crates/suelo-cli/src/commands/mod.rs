//! Command implementations

mod assess;
mod config;
mod reports;
mod stats;

use crate::cli::{Cli, Commands};
use crate::context;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = context::load_config(&cli)?;

    match cli.command {
        Commands::Config => config::execute(&config, &output),
        Commands::Assess(args) => {
            let store = context::open_store(&config).await;
            assess::execute(args, &store, &output).await
        }
        Commands::Reports(args) => {
            let store = context::open_store(&config).await;
            reports::execute(args, &store, &output).await
        }
        Commands::Stats => {
            let store = context::open_store(&config).await;
            stats::execute(&store, &output).await
        }
    }
}
