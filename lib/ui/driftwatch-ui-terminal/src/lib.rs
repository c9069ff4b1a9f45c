//! Command-line surface and service wiring.

pub mod bootstrap;
pub mod cli;
pub mod logging;
pub mod output;
pub mod service;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

/// Entry point for the `cli` binary.
pub fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    let config = bootstrap::load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Check(args) => cli::check(&config, &args),
        Command::Run => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(service::run_service(config))
        }
    }
}
