use serde::{Deserialize, Serialize};

/// Announce/scrape state of one tracker of one torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerStat {
    pub id: i64,
    pub announce: String,
    pub scrape: String,
    pub host: String,
    pub tier: i64,
    pub announce_state: i32,
    pub last_announce_result: String,
    pub last_announce_succeeded: bool,
    pub last_announce_peer_count: i64,
    pub seeder_count: i64,
    pub leecher_count: i64,
    pub download_count: i64,
    pub next_announce_time: i64,
    pub is_backup: bool,
}
