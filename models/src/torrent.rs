//! The download record reported by `torrent-get`.

use crate::field::registry::FieldRegistry;
use crate::field::{ChangeTracker, FieldSet, assign};
use crate::files::{FileStat, TorrentFile};
use crate::peer::Peer;
use crate::tracker::TrackerStat;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Enumerated view of the daemon's raw integer `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentStatus {
    Stopped,
    CheckWait,
    Check,
    DownloadWait,
    Download,
    SeedWait,
    Seed,
    Unknown(i32),
}

impl TorrentStatus {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => TorrentStatus::Stopped,
            1 => TorrentStatus::CheckWait,
            2 => TorrentStatus::Check,
            3 => TorrentStatus::DownloadWait,
            4 => TorrentStatus::Download,
            5 => TorrentStatus::SeedWait,
            6 => TorrentStatus::Seed,
            other => TorrentStatus::Unknown(other),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TorrentStatus::Check | TorrentStatus::Download | TorrentStatus::Seed
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            TorrentStatus::Stopped => "Stopped",
            TorrentStatus::CheckWait => "Queued for verification",
            TorrentStatus::Check => "Verifying",
            TorrentStatus::DownloadWait => "Queued for download",
            TorrentStatus::Download => "Downloading",
            TorrentStatus::SeedWait => "Queued for seeding",
            TorrentStatus::Seed => "Seeding",
            TorrentStatus::Unknown(_) => "Unknown",
        }
    }
}

/// Enumerated view of `seedRatioMode` / `seedIdleMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedLimitPolicy {
    /// Follow the session-wide limit.
    Global,
    /// Use this torrent's own limit.
    Single,
    Unlimited,
    Unknown(i32),
}

impl SeedLimitPolicy {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => SeedLimitPolicy::Global,
            1 => SeedLimitPolicy::Single,
            2 => SeedLimitPolicy::Unlimited,
            other => SeedLimitPolicy::Unknown(other),
        }
    }

    pub fn raw(&self) -> i32 {
        match self {
            SeedLimitPolicy::Global => 0,
            SeedLimitPolicy::Single => 1,
            SeedLimitPolicy::Unlimited => 2,
            SeedLimitPolicy::Unknown(raw) => *raw,
        }
    }
}

/// One download as reported by the daemon.
///
/// `torrent-get` only returns the fields that were asked for, so every field
/// defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Torrent {
    pub id: i64,
    pub hash_string: String,
    pub name: String,
    pub status: i32,
    pub total_size: i64,
    pub size_when_done: i64,
    pub left_until_done: i64,
    pub have_valid: i64,
    pub have_unchecked: i64,
    pub downloaded_ever: i64,
    pub uploaded_ever: i64,
    pub rate_download: i64,
    pub rate_upload: i64,
    pub upload_ratio: f64,
    pub eta: i64,
    pub error: i32,
    pub error_string: String,
    pub download_dir: String,
    pub added_date: i64,
    pub done_date: i64,
    pub activity_date: i64,
    pub peers_connected: i64,
    pub peers_getting_from_us: i64,
    pub peers_sending_to_us: i64,
    pub queue_position: i64,
    pub bandwidth_priority: i32,
    pub download_limit: i64,
    pub download_limited: bool,
    pub upload_limit: i64,
    pub upload_limited: bool,
    pub honors_session_limits: bool,
    pub seed_ratio_limit: f64,
    pub seed_ratio_mode: i32,
    pub seed_idle_limit: i64,
    pub seed_idle_mode: i32,
    #[serde(rename = "peer-limit")]
    pub peer_limit: i64,
    pub is_finished: bool,
    pub is_stalled: bool,
    pub is_private: bool,
    pub comment: String,
    pub creator: String,
    pub date_created: i64,
    pub piece_count: i64,
    pub piece_size: i64,
    pub recheck_progress: f64,
    pub labels: Vec<String>,
    pub files: Vec<TorrentFile>,
    pub file_stats: Vec<FileStat>,
    pub peers: Vec<Peer>,
    pub tracker_stats: Vec<TrackerStat>,
    #[serde(skip)]
    pub(crate) changes: ChangeTracker,
}

impl Torrent {
    /// Fields needed to render the main list.
    pub const LIST_FIELDS: &'static [&'static str] = &[
        "id",
        "hashString",
        "name",
        "status",
        "totalSize",
        "sizeWhenDone",
        "leftUntilDone",
        "rateDownload",
        "rateUpload",
        "uploadRatio",
        "uploadedEver",
        "eta",
        "error",
        "errorString",
        "downloadDir",
        "addedDate",
        "doneDate",
        "peersConnected",
        "peersGettingFromUs",
        "peersSendingToUs",
        "queuePosition",
        "isFinished",
        "isStalled",
        "recheckProgress",
        "labels",
    ];

    /// Everything the details pane shows for a single torrent.
    pub const DETAIL_FIELDS: &'static [&'static str] = &[
        "id",
        "hashString",
        "name",
        "status",
        "totalSize",
        "sizeWhenDone",
        "leftUntilDone",
        "haveValid",
        "haveUnchecked",
        "downloadedEver",
        "uploadedEver",
        "rateDownload",
        "rateUpload",
        "uploadRatio",
        "eta",
        "error",
        "errorString",
        "downloadDir",
        "addedDate",
        "doneDate",
        "activityDate",
        "queuePosition",
        "bandwidthPriority",
        "downloadLimit",
        "downloadLimited",
        "uploadLimit",
        "uploadLimited",
        "honorsSessionLimits",
        "seedRatioLimit",
        "seedRatioMode",
        "seedIdleLimit",
        "seedIdleMode",
        "peer-limit",
        "isPrivate",
        "comment",
        "creator",
        "dateCreated",
        "pieceCount",
        "pieceSize",
        "labels",
        "files",
        "fileStats",
        "peers",
        "trackerStats",
    ];

    pub fn status_kind(&self) -> TorrentStatus {
        TorrentStatus::from_raw(self.status)
    }

    /// Completed fraction of the wanted data, in `0.0..=1.0`.
    pub fn percent_done(&self) -> f64 {
        if self.size_when_done <= 0 {
            return 0.0;
        }
        let have = (self.size_when_done - self.left_until_done).max(0);
        (have as f64 / self.size_when_done as f64).min(1.0)
    }

    pub fn has_error(&self) -> bool {
        self.error != 0
    }

    pub fn seed_ratio_policy(&self) -> SeedLimitPolicy {
        SeedLimitPolicy::from_raw(self.seed_ratio_mode)
    }

    pub fn seed_idle_policy(&self) -> SeedLimitPolicy {
        SeedLimitPolicy::from_raw(self.seed_idle_mode)
    }
}

static TORRENT_FIELDS: Lazy<FieldRegistry<Torrent>> = Lazy::new(|| {
    FieldRegistry::<Torrent>::builder()
        .field("name", |t, v, f| assign(&mut t.name, v, f))
        .field("status", |t, v, f| assign(&mut t.status, v, f))
        .field("sizeWhenDone", |t, v, f| assign(&mut t.size_when_done, v, f))
        .field("leftUntilDone", |t, v, f| assign(&mut t.left_until_done, v, f))
        .field("rateDownload", |t, v, f| assign(&mut t.rate_download, v, f))
        .field("rateUpload", |t, v, f| assign(&mut t.rate_upload, v, f))
        .field("uploadRatio", |t, v, f| assign(&mut t.upload_ratio, v, f))
        .field("uploadedEver", |t, v, f| assign(&mut t.uploaded_ever, v, f))
        .field("eta", |t, v, f| assign(&mut t.eta, v, f))
        .field("error", |t, v, f| assign(&mut t.error, v, f))
        .field("errorString", |t, v, f| assign(&mut t.error_string, v, f))
        .field("downloadDir", |t, v, f| assign(&mut t.download_dir, v, f))
        .field("peersConnected", |t, v, f| assign(&mut t.peers_connected, v, f))
        .field("queuePosition", |t, v, f| assign(&mut t.queue_position, v, f))
        .field("seedRatioMode", |t, v, f| assign(&mut t.seed_ratio_mode, v, f))
        .field("seedIdleMode", |t, v, f| assign(&mut t.seed_idle_mode, v, f))
        .field("recheckProgress", |t, v, f| assign(&mut t.recheck_progress, v, f))
        .field("labels", |t, v, f| assign(&mut t.labels, v, f))
        .derives("status", &["statusKind"])
        .derives("sizeWhenDone", &["percentDone"])
        .derives("leftUntilDone", &["percentDone"])
        .derives("error", &["hasError"])
        .derives("seedRatioMode", &["seedRatioPolicy"])
        .derives("seedIdleMode", &["seedIdlePolicy"])
        .build()
});

impl FieldSet for Torrent {
    fn registry() -> &'static FieldRegistry<Self> {
        &TORRENT_FIELDS
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.changes
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.changes
    }
}
