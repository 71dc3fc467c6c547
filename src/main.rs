mod cli;
mod commands;
mod config;
mod error;
mod handoff;
mod spin;
mod store;

use std::process::ExitCode;

use canvas::error::ErrorCode;
use clap::Parser;

use crate::cli::Cli;
use crate::commands::Studio;
use crate::config::StudioConfig;
use crate::error::CliError;
use crate::store::FileStore;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    let mut config = StudioConfig::from_env()?;
    tracing_subscriber::fmt().with_max_level(config.log_level).with_writer(std::io::stderr).init();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();
    if let Some(dir) = cli.dir {
        config.pages_dir = dir;
    }
    tracing::debug!(dir = %config.pages_dir.display(), "page directory");

    let store = FileStore::new(config.pages_dir.clone());
    let studio = Studio::new(config, store);
    let mut stdout = std::io::stdout().lock();
    commands::run(&studio, cli.command, &mut stdout).await
}
