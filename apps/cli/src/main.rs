use tremote::cli::Cli;
use tremote::commands;
use tremote::error::CliError;
use tremote::logger::{console_level, default_log_dir, initialize as LoggerInitialize};

use client_core::config::ClientConfig;

use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("tremote: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::load_with_env(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let log_dir = config.logging.directory.clone().unwrap_or_else(default_log_dir);
    LoggerInitialize(&log_dir, console_level(cli.verbose))?;
    info!("tremote {} starting: {:?}", env!("CARGO_PKG_VERSION"), cli.command);

    let mut out = stdout().lock();
    commands::run(&cli.command, &config, &mut out).await
}
