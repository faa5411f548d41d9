use crate::field::registry::FieldRegistry;
use crate::field::{ChangeTracker, FieldSet, accept_snapshot, assign, sync};
use crate::files::{FileStat, Priority};
use crate::mutator::AssignFrom;
use crate::mutator::file::FileStatMutator;
use crate::torrent::{SeedLimitPolicy, Torrent};

use once_cell::sync::Lazy;
use serde::Serialize;

const FILES_WANTED: &str = "files-wanted";
const FILES_UNWANTED: &str = "files-unwanted";
const PRIORITY_HIGH: &str = "priority-high";
const PRIORITY_NORMAL: &str = "priority-normal";
const PRIORITY_LOW: &str = "priority-low";

/// Sparse `torrent-set` arguments (without `ids`, which the request adds).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentMutator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honors_session_limits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_mode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_idle_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_idle_mode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(rename = "peer-limit", skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i64>,
    #[serde(rename = "files-wanted", skip_serializing_if = "Option::is_none")]
    pub files_wanted: Option<Vec<i64>>,
    #[serde(rename = "files-unwanted", skip_serializing_if = "Option::is_none")]
    pub files_unwanted: Option<Vec<i64>>,
    #[serde(rename = "priority-high", skip_serializing_if = "Option::is_none")]
    pub priority_high: Option<Vec<i64>>,
    #[serde(rename = "priority-normal", skip_serializing_if = "Option::is_none")]
    pub priority_normal: Option<Vec<i64>>,
    #[serde(rename = "priority-low", skip_serializing_if = "Option::is_none")]
    pub priority_low: Option<Vec<i64>>,
    #[serde(skip)]
    changes: ChangeTracker,
}

impl TorrentMutator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is present; such a mutator is never sent.
    pub fn is_empty(&self) -> bool {
        self.bandwidth_priority.is_none()
            && self.download_limit.is_none()
            && self.download_limited.is_none()
            && self.upload_limit.is_none()
            && self.upload_limited.is_none()
            && self.honors_session_limits.is_none()
            && self.seed_ratio_limit.is_none()
            && self.seed_ratio_mode.is_none()
            && self.seed_idle_limit.is_none()
            && self.seed_idle_mode.is_none()
            && self.queue_position.is_none()
            && self.labels.is_none()
            && self.peer_limit.is_none()
            && self.files_wanted.is_none()
            && self.files_unwanted.is_none()
            && self.priority_high.is_none()
            && self.priority_normal.is_none()
            && self.priority_low.is_none()
    }

    pub fn priority_kind(&self) -> Option<Priority> {
        self.bandwidth_priority.map(Priority::from_raw)
    }

    pub fn seed_ratio_policy(&self) -> Option<SeedLimitPolicy> {
        self.seed_ratio_mode.map(SeedLimitPolicy::from_raw)
    }

    pub fn seed_idle_policy(&self) -> Option<SeedLimitPolicy> {
        self.seed_idle_mode.map(SeedLimitPolicy::from_raw)
    }

    /// Fold a per-file change for file `index` into the index lists.
    ///
    /// Moves the index out of the opposite lists, so applying "wanted" after
    /// "unwanted" for the same file leaves only "wanted".
    pub fn apply_file_change(&mut self, index: i64, change: &FileStatMutator) {
        if let Some(wanted) = change.wanted {
            let (target, opposite) = if wanted {
                (FILES_WANTED, FILES_UNWANTED)
            } else {
                (FILES_UNWANTED, FILES_WANTED)
            };
            self.move_index(index, target, &[opposite]);
        }

        if let Some(priority) = change.priority_kind() {
            let target = match priority {
                Priority::High => PRIORITY_HIGH,
                Priority::Normal => PRIORITY_NORMAL,
                Priority::Low => PRIORITY_LOW,
            };
            let others: Vec<&'static str> = [PRIORITY_HIGH, PRIORITY_NORMAL, PRIORITY_LOW]
                .into_iter()
                .filter(|name| *name != target)
                .collect();
            self.move_index(index, target, &others);
        }
    }

    fn index_list(&mut self, name: &str) -> &mut Option<Vec<i64>> {
        match name {
            FILES_WANTED => &mut self.files_wanted,
            FILES_UNWANTED => &mut self.files_unwanted,
            PRIORITY_HIGH => &mut self.priority_high,
            PRIORITY_NORMAL => &mut self.priority_normal,
            _ => &mut self.priority_low,
        }
    }

    fn move_index(&mut self, index: i64, target: &'static str, opposites: &[&'static str]) {
        for opposite in opposites {
            let list = self.index_list(opposite);
            let emptied = match list.as_mut() {
                Some(indices) if indices.contains(&index) => {
                    indices.retain(|i| *i != index);
                    indices.is_empty()
                }
                _ => continue,
            };
            if emptied {
                *list = None;
            }
            self.changes.record(opposite, &[]);
        }

        let list = self.index_list(target).get_or_insert_with(Vec::new);
        if !list.contains(&index) {
            list.push(index);
            self.changes.record(target, &[]);
        }
    }
}

static TORRENT_MUTATOR_FIELDS: Lazy<FieldRegistry<TorrentMutator>> = Lazy::new(|| {
    FieldRegistry::<TorrentMutator>::builder()
        .field("bandwidthPriority", |m, v, f| assign(&mut m.bandwidth_priority, v, f))
        .field("downloadLimit", |m, v, f| assign(&mut m.download_limit, v, f))
        .field("downloadLimited", |m, v, f| assign(&mut m.download_limited, v, f))
        .field("uploadLimit", |m, v, f| assign(&mut m.upload_limit, v, f))
        .field("uploadLimited", |m, v, f| assign(&mut m.upload_limited, v, f))
        .field("honorsSessionLimits", |m, v, f| assign(&mut m.honors_session_limits, v, f))
        .field("seedRatioLimit", |m, v, f| assign(&mut m.seed_ratio_limit, v, f))
        .field("seedRatioMode", |m, v, f| assign(&mut m.seed_ratio_mode, v, f))
        .field("seedIdleLimit", |m, v, f| assign(&mut m.seed_idle_limit, v, f))
        .field("seedIdleMode", |m, v, f| assign(&mut m.seed_idle_mode, v, f))
        .field("queuePosition", |m, v, f| assign(&mut m.queue_position, v, f))
        .field("labels", |m, v, f| assign(&mut m.labels, v, f))
        .field("peer-limit", |m, v, f| assign(&mut m.peer_limit, v, f))
        .field(FILES_WANTED, |m, v, f| assign(&mut m.files_wanted, v, f))
        .field(FILES_UNWANTED, |m, v, f| assign(&mut m.files_unwanted, v, f))
        .field(PRIORITY_HIGH, |m, v, f| assign(&mut m.priority_high, v, f))
        .field(PRIORITY_NORMAL, |m, v, f| assign(&mut m.priority_normal, v, f))
        .field(PRIORITY_LOW, |m, v, f| assign(&mut m.priority_low, v, f))
        .derives("bandwidthPriority", &["priorityKind"])
        .derives("seedRatioMode", &["seedRatioPolicy"])
        .derives("seedIdleMode", &["seedIdlePolicy"])
        .build()
});

impl FieldSet for TorrentMutator {
    fn registry() -> &'static FieldRegistry<Self> {
        &TORRENT_MUTATOR_FIELDS
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.changes
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.changes
    }
}

impl AssignFrom<Torrent> for TorrentMutator {
    fn assign_from(&mut self, source: &Torrent) {
        let mut changed = Vec::new();

        sync(&mut self.bandwidth_priority, &Some(source.bandwidth_priority), "bandwidthPriority", &mut changed);
        sync(&mut self.download_limit, &Some(source.download_limit), "downloadLimit", &mut changed);
        sync(&mut self.download_limited, &Some(source.download_limited), "downloadLimited", &mut changed);
        sync(&mut self.upload_limit, &Some(source.upload_limit), "uploadLimit", &mut changed);
        sync(&mut self.upload_limited, &Some(source.upload_limited), "uploadLimited", &mut changed);
        sync(&mut self.honors_session_limits, &Some(source.honors_session_limits), "honorsSessionLimits", &mut changed);
        sync(&mut self.seed_ratio_limit, &Some(source.seed_ratio_limit), "seedRatioLimit", &mut changed);
        sync(&mut self.seed_ratio_mode, &Some(source.seed_ratio_mode), "seedRatioMode", &mut changed);
        sync(&mut self.seed_idle_limit, &Some(source.seed_idle_limit), "seedIdleLimit", &mut changed);
        sync(&mut self.seed_idle_mode, &Some(source.seed_idle_mode), "seedIdleMode", &mut changed);
        sync(&mut self.queue_position, &Some(source.queue_position), "queuePosition", &mut changed);
        sync(&mut self.labels, &Some(source.labels.clone()), "labels", &mut changed);
        sync(&mut self.peer_limit, &Some(source.peer_limit), "peer-limit", &mut changed);

        // Per-file selections only exist when fileStats were fetched.
        if !source.file_stats.is_empty() {
            let indices = |keep: &dyn Fn(&FileStat) -> bool| -> Option<Vec<i64>> {
                let selected: Vec<i64> = source
                    .file_stats
                    .iter()
                    .enumerate()
                    .filter(|(_, stat)| keep(stat))
                    .map(|(index, _)| index as i64)
                    .collect();
                (!selected.is_empty()).then_some(selected)
            };

            sync(&mut self.files_wanted, &indices(&|s| s.wanted), FILES_WANTED, &mut changed);
            sync(&mut self.files_unwanted, &indices(&|s| !s.wanted), FILES_UNWANTED, &mut changed);
            sync(&mut self.priority_high, &indices(&|s| s.priority_kind() == Priority::High), PRIORITY_HIGH, &mut changed);
            sync(&mut self.priority_normal, &indices(&|s| s.priority_kind() == Priority::Normal), PRIORITY_NORMAL, &mut changed);
            sync(&mut self.priority_low, &indices(&|s| s.priority_kind() == Priority::Low), PRIORITY_LOW, &mut changed);
        }

        accept_snapshot(self, &changed);
    }
}

impl AssignFrom<TorrentMutator> for TorrentMutator {
    fn assign_from(&mut self, source: &TorrentMutator) {
        let mut changed = Vec::new();

        sync(&mut self.bandwidth_priority, &source.bandwidth_priority, "bandwidthPriority", &mut changed);
        sync(&mut self.download_limit, &source.download_limit, "downloadLimit", &mut changed);
        sync(&mut self.download_limited, &source.download_limited, "downloadLimited", &mut changed);
        sync(&mut self.upload_limit, &source.upload_limit, "uploadLimit", &mut changed);
        sync(&mut self.upload_limited, &source.upload_limited, "uploadLimited", &mut changed);
        sync(&mut self.honors_session_limits, &source.honors_session_limits, "honorsSessionLimits", &mut changed);
        sync(&mut self.seed_ratio_limit, &source.seed_ratio_limit, "seedRatioLimit", &mut changed);
        sync(&mut self.seed_ratio_mode, &source.seed_ratio_mode, "seedRatioMode", &mut changed);
        sync(&mut self.seed_idle_limit, &source.seed_idle_limit, "seedIdleLimit", &mut changed);
        sync(&mut self.seed_idle_mode, &source.seed_idle_mode, "seedIdleMode", &mut changed);
        sync(&mut self.queue_position, &source.queue_position, "queuePosition", &mut changed);
        sync(&mut self.labels, &source.labels, "labels", &mut changed);
        sync(&mut self.peer_limit, &source.peer_limit, "peer-limit", &mut changed);
        sync(&mut self.files_wanted, &source.files_wanted, FILES_WANTED, &mut changed);
        sync(&mut self.files_unwanted, &source.files_unwanted, FILES_UNWANTED, &mut changed);
        sync(&mut self.priority_high, &source.priority_high, PRIORITY_HIGH, &mut changed);
        sync(&mut self.priority_normal, &source.priority_normal, PRIORITY_NORMAL, &mut changed);
        sync(&mut self.priority_low, &source.priority_low, PRIORITY_LOW, &mut changed);

        accept_snapshot(self, &changed);
    }
}
