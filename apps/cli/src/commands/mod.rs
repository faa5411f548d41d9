//! Command dispatch.

pub mod daemon;
pub mod inspect;

use crate::cli::Command;
use crate::error::CliError;

use client_core::RpcSession;
use client_core::config::ClientConfig;

use std::io::Write;

use log::debug;

/// Run `command`, connecting to the configured daemon when it needs one.
pub async fn run(
    command: &Command,
    config: &ClientConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let Command::Inspect { file } = command {
        return inspect::run(file, out);
    }

    let connection = config.connection_config()?;
    debug!("Connecting to {}", connection.endpoint_url());
    let session = RpcSession::new(connection)?;

    daemon::execute(command, &session, out).await
}
