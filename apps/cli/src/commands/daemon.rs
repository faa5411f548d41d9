//! Commands that talk to the daemon.

use crate::cli::{Command, ids_or_all};
use crate::error::CliError;
use crate::output;

use client_core::rpc::request::AddOptions;
use client_core::{RpcSession, Transport};

use models::{FieldSet, SessionSettingsMutator, TorrentMutator};

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

pub async fn execute<T: Transport>(
    command: &Command,
    session: &RpcSession<T>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::List => {
            let torrents = session.list_torrents().await?;
            output::write_torrent_list(out, &torrents)?;
        }
        Command::Show { id } => match session.torrent_details(*id).await? {
            Some(torrent) => output::write_torrent_details(out, &torrent)?,
            None => return Err(CliError::input(format!("No torrent with id {id}"))),
        },
        Command::Stats => {
            let stats = session.session_stats().await?;
            output::write_stats(out, &stats)?;
        }
        Command::Session => {
            let settings = session.session_settings().await?;
            output::write_session(out, &settings)?;
        }
        Command::Add {
            source,
            paused,
            download_dir,
        } => {
            let mut options = AddOptions::default();
            if *paused {
                options = options.with_paused(true);
            }
            if let Some(dir) = download_dir {
                options = options.with_download_dir(dir.clone());
            }

            let outcome = if is_link(source) {
                session.add_torrent_link(source, options).await?
            } else {
                let contents = std::fs::read(Path::new(source))
                    .map_err(|e| CliError::input(format!("Cannot read {source}: {e}")))?;
                session.add_torrent_file(&contents, options).await?
            };
            output::write_added(out, &outcome)?;
        }
        Command::Remove { ids, delete_data } => {
            session.remove_torrents(ids.clone(), *delete_data).await?;
            writeln!(out, "Removed {} torrent(s)", ids.len())?;
        }
        Command::Start { ids, now } => {
            if *now {
                session.start_torrents_now(ids_or_all(ids)).await?;
            } else {
                session.start_torrents(ids_or_all(ids)).await?;
            }
        }
        Command::Stop { ids } => session.stop_torrents(ids_or_all(ids)).await?,
        Command::Verify { ids } => session.verify_torrents(ids_or_all(ids)).await?,
        Command::Reannounce { ids } => session.reannounce_torrents(ids_or_all(ids)).await?,
        Command::Move {
            ids,
            to,
            keep_files,
        } => {
            session.set_location(ids.clone(), to.clone(), !keep_files).await?;
        }
        Command::Set { id, field, value } => {
            let mut mutator = TorrentMutator::new();
            assign(&mut mutator, field, value)?;
            session.mutate_torrents(*id, &mut mutator).await?;
            info!("Torrent {id}: {field} = {value}");
        }
        Command::SessionSet { field, value } => {
            let mut mutator = SessionSettingsMutator::new();
            assign(&mut mutator, field, value)?;
            session.mutate_session(&mut mutator).await?;
            info!("Session: {field} = {value}");
        }
        Command::FreeSpace { path } => {
            let space = session.free_space(path.clone()).await?;
            output::write_free_space(out, &space)?;
        }
        Command::PortTest => {
            let open = session.port_test().await?;
            writeln!(out, "Peer port is {}", if open { "open" } else { "closed" })?;
        }
        Command::Inspect { .. } => {
            return Err(CliError::input("inspect does not contact the daemon"));
        }
    }

    Ok(())
}

/// Magnet links and URLs go to the daemon as-is; anything else is a local file.
pub fn is_link(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    ["magnet:", "http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Command-line values are JSON when they parse as JSON, strings otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Set `field` on a fresh mutator, rejecting names it does not know.
pub fn assign<M: FieldSet>(mutator: &mut M, field: &str, raw: &str) -> Result<(), CliError> {
    if !M::registry().contains(field) {
        return Err(CliError::input(format!(
            "Unknown field '{field}'. Known fields: {}",
            M::registry().names().join(", ")
        )));
    }

    let value = parse_value(raw);
    debug!("Setting {field} to {value}");
    mutator.set_field(field, value)?;
    Ok(())
}
