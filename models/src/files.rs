//! Per-file records: the static `files` list and the live `fileStats`.

use serde::{Deserialize, Serialize};

/// Priority of a file or of a whole torrent's bandwidth share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    /// Out-of-range values are treated as normal priority.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            r if r < 0 => Priority::Low,
            0 => Priority::Normal,
            _ => Priority::High,
        }
    }

    pub fn raw(&self) -> i32 {
        match self {
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorrentFile {
    pub name: String,
    pub length: i64,
    pub bytes_completed: i64,
}

impl TorrentFile {
    pub fn percent_done(&self) -> f64 {
        if self.length <= 0 {
            return 0.0;
        }
        (self.bytes_completed as f64 / self.length as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileStat {
    pub bytes_completed: i64,
    pub wanted: bool,
    pub priority: i32,
}

impl FileStat {
    pub fn priority_kind(&self) -> Priority {
        Priority::from_raw(self.priority)
    }
}
