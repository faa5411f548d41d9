//! Daemon-wide settings reported by `session-get`.

use serde::{Deserialize, Serialize};

/// Enumerated view of the `encryption` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionMode {
    Required,
    Preferred,
    Tolerated,
    Unknown,
}

impl EncryptionMode {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "required" => EncryptionMode::Required,
            "preferred" => EncryptionMode::Preferred,
            "tolerated" => EncryptionMode::Tolerated,
            _ => EncryptionMode::Unknown,
        }
    }

    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            EncryptionMode::Required => Some("required"),
            EncryptionMode::Preferred => Some("preferred"),
            EncryptionMode::Tolerated => Some("tolerated"),
            EncryptionMode::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionSettings {
    pub version: String,
    pub rpc_version: i64,
    pub rpc_version_minimum: i64,
    pub config_dir: String,
    pub download_dir: String,
    pub incomplete_dir: String,
    pub incomplete_dir_enabled: bool,
    pub speed_limit_down: i64,
    pub speed_limit_down_enabled: bool,
    pub speed_limit_up: i64,
    pub speed_limit_up_enabled: bool,
    pub alt_speed_down: i64,
    pub alt_speed_up: i64,
    pub alt_speed_enabled: bool,
    pub peer_port: i64,
    pub peer_port_random_on_start: bool,
    pub port_forwarding_enabled: bool,
    pub peer_limit_global: i64,
    pub peer_limit_per_torrent: i64,
    pub pex_enabled: bool,
    pub dht_enabled: bool,
    pub lpd_enabled: bool,
    pub utp_enabled: bool,
    pub encryption: String,
    #[serde(rename = "seedRatioLimit")]
    pub seed_ratio_limit: f64,
    #[serde(rename = "seedRatioLimited")]
    pub seed_ratio_limited: bool,
    pub idle_seeding_limit: i64,
    pub idle_seeding_limit_enabled: bool,
    pub download_queue_size: i64,
    pub download_queue_enabled: bool,
    pub seed_queue_size: i64,
    pub seed_queue_enabled: bool,
    pub start_added_torrents: bool,
    pub rename_partial_files: bool,
}

impl SessionSettings {
    /// Fields requested by the connection probe.
    pub const PROBE_FIELDS: &'static [&'static str] = &["version", "rpc-version", "rpc-version-minimum"];

    pub fn encryption_mode(&self) -> EncryptionMode {
        EncryptionMode::from_wire(&self.encryption)
    }
}
