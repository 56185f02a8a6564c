//! Speedrun Orchestrator CLI.
//!
//! Turns a docs URL and a few episode details into a speedrun plan and
//! short-form clip ideas, either in-process or against a running server.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
