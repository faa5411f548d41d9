//! Command-line surface.

use client_core::DEFAULT_DAEMON_URL;
use client_core::config::ClientConfig;
use client_core::rpc::Ids;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use const_format::concatcp;

const AFTER_HELP: &str = concatcp!(
    "Without a config file the daemon is expected at ",
    DEFAULT_DAEMON_URL,
    ".\nTREMOTE_HOST, TREMOTE_PORT, TREMOTE_SECURE, TREMOTE_USERNAME, TREMOTE_PASSWORD and \
     TREMOTE_TIMEOUT_SECS override the config file; flags override both."
);

#[derive(Debug, Parser)]
#[command(name = "tremote", version, about = "Control a remote download daemon", after_help = AFTER_HELP)]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Use HTTPS
    #[arg(long, global = true)]
    pub secure: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List torrents
    List,

    /// Show one torrent in detail
    Show { id: i64 },

    /// Transfer statistics
    Stats,

    /// Daemon settings
    Session,

    /// Add a .torrent file, magnet link or URL
    Add {
        source: String,

        #[arg(long)]
        paused: bool,

        #[arg(long, value_name = "DIR")]
        download_dir: Option<String>,
    },

    /// Remove torrents
    Remove {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Also delete downloaded data
        #[arg(long)]
        delete_data: bool,
    },

    /// Start torrents (all when no ids are given)
    Start {
        ids: Vec<i64>,

        /// Skip the download queue
        #[arg(long)]
        now: bool,
    },

    /// Stop torrents (all when no ids are given)
    Stop { ids: Vec<i64> },

    /// Verify local data (all when no ids are given)
    Verify { ids: Vec<i64> },

    /// Ask trackers for more peers (all when no ids are given)
    Reannounce { ids: Vec<i64> },

    /// Move torrent data to a new location
    Move {
        #[arg(required = true)]
        ids: Vec<i64>,

        #[arg(long, required = true)]
        to: String,

        /// Only point the daemon at the new location, keep files where they are
        #[arg(long)]
        keep_files: bool,
    },

    /// Change one torrent field, e.g. `set 3 uploadLimit 50`
    Set { id: i64, field: String, value: String },

    /// Change one daemon setting, e.g. `session-set speed-limit-down 200`
    SessionSet { field: String, value: String },

    /// Free space at a path on the daemon's host
    FreeSpace { path: String },

    /// Check whether the peer port is reachable
    PortTest,

    /// Decode a .torrent file locally
    Inspect { file: PathBuf },
}

impl Cli {
    /// Apply connection flags on top of file and environment values.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(host) = &self.host {
            config.daemon.host = host.clone();
        }
        if let Some(port) = self.port {
            config.daemon.port = port;
        }
        if self.secure {
            config.daemon.secure = true;
        }
    }
}

impl Command {
    /// Whether the command needs the daemon at all.
    pub fn is_local(&self) -> bool {
        matches!(self, Command::Inspect { .. })
    }
}

/// No ids on the command line means every torrent.
pub fn ids_or_all(ids: &[i64]) -> Ids {
    if ids.is_empty() {
        Ids::All
    } else {
        Ids::from(ids)
    }
}
