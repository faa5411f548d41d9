use serde::{Deserialize, Serialize};

/// Byte and file counters for one period (`current-stats` / `cumulative-stats`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferTotals {
    pub uploaded_bytes: i64,
    pub downloaded_bytes: i64,
    pub files_added: i64,
    pub session_count: i64,
    pub seconds_active: i64,
}

impl TransferTotals {
    pub fn ratio(&self) -> Option<f64> {
        if self.downloaded_bytes <= 0 {
            return None;
        }
        Some(self.uploaded_bytes as f64 / self.downloaded_bytes as f64)
    }
}

/// Aggregate daemon statistics from `session-stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionStats {
    pub active_torrent_count: i64,
    pub paused_torrent_count: i64,
    pub torrent_count: i64,
    pub download_speed: i64,
    pub upload_speed: i64,
    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: TransferTotals,
    #[serde(rename = "current-stats")]
    pub current_stats: TransferTotals,
}
