//! Binary entry point: CLI, env, runner.

use anyhow::Result;
use clap::Parser;
use quote_bot::cli::{load_config, Cli, Commands};
use quote_bot::run_bot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
    }
}
