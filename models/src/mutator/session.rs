use crate::field::registry::FieldRegistry;
use crate::field::{ChangeTracker, FieldSet, accept_snapshot, assign, sync};
use crate::mutator::AssignFrom;
use crate::session::{EncryptionMode, SessionSettings};

use once_cell::sync::Lazy;
use serde::Serialize;

/// Sparse `session-set` arguments.
///
/// Read-only session fields (`version`, `rpc-version`, `config-dir`) have
/// no counterpart here.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionSettingsMutator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_dir_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_down_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit_up_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_down: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_up: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_speed_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_port_random_on_start: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_forwarding_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_limit_global: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_limit_per_torrent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pex_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dht_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lpd_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(rename = "seedRatioLimit", skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(rename = "seedRatioLimited", skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_seeding_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_seeding_limit_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_queue_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_queue_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_added_torrents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_partial_files: Option<bool>,
    #[serde(skip)]
    changes: ChangeTracker,
}

impl SessionSettingsMutator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encryption_mode(&self) -> Option<EncryptionMode> {
        self.encryption.as_deref().map(EncryptionMode::from_wire)
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .ok()
            .and_then(|value| value.as_object().map(|fields| fields.is_empty()))
            .unwrap_or(true)
    }
}

static SESSION_MUTATOR_FIELDS: Lazy<FieldRegistry<SessionSettingsMutator>> = Lazy::new(|| {
    FieldRegistry::<SessionSettingsMutator>::builder()
        .field("download-dir", |m, v, f| assign(&mut m.download_dir, v, f))
        .field("incomplete-dir", |m, v, f| assign(&mut m.incomplete_dir, v, f))
        .field("incomplete-dir-enabled", |m, v, f| assign(&mut m.incomplete_dir_enabled, v, f))
        .field("speed-limit-down", |m, v, f| assign(&mut m.speed_limit_down, v, f))
        .field("speed-limit-down-enabled", |m, v, f| assign(&mut m.speed_limit_down_enabled, v, f))
        .field("speed-limit-up", |m, v, f| assign(&mut m.speed_limit_up, v, f))
        .field("speed-limit-up-enabled", |m, v, f| assign(&mut m.speed_limit_up_enabled, v, f))
        .field("alt-speed-down", |m, v, f| assign(&mut m.alt_speed_down, v, f))
        .field("alt-speed-up", |m, v, f| assign(&mut m.alt_speed_up, v, f))
        .field("alt-speed-enabled", |m, v, f| assign(&mut m.alt_speed_enabled, v, f))
        .field("peer-port", |m, v, f| assign(&mut m.peer_port, v, f))
        .field("peer-port-random-on-start", |m, v, f| assign(&mut m.peer_port_random_on_start, v, f))
        .field("port-forwarding-enabled", |m, v, f| assign(&mut m.port_forwarding_enabled, v, f))
        .field("peer-limit-global", |m, v, f| assign(&mut m.peer_limit_global, v, f))
        .field("peer-limit-per-torrent", |m, v, f| assign(&mut m.peer_limit_per_torrent, v, f))
        .field("pex-enabled", |m, v, f| assign(&mut m.pex_enabled, v, f))
        .field("dht-enabled", |m, v, f| assign(&mut m.dht_enabled, v, f))
        .field("lpd-enabled", |m, v, f| assign(&mut m.lpd_enabled, v, f))
        .field("utp-enabled", |m, v, f| assign(&mut m.utp_enabled, v, f))
        .field("encryption", |m, v, f| assign(&mut m.encryption, v, f))
        .field("seedRatioLimit", |m, v, f| assign(&mut m.seed_ratio_limit, v, f))
        .field("seedRatioLimited", |m, v, f| assign(&mut m.seed_ratio_limited, v, f))
        .field("idle-seeding-limit", |m, v, f| assign(&mut m.idle_seeding_limit, v, f))
        .field("idle-seeding-limit-enabled", |m, v, f| assign(&mut m.idle_seeding_limit_enabled, v, f))
        .field("download-queue-size", |m, v, f| assign(&mut m.download_queue_size, v, f))
        .field("download-queue-enabled", |m, v, f| assign(&mut m.download_queue_enabled, v, f))
        .field("seed-queue-size", |m, v, f| assign(&mut m.seed_queue_size, v, f))
        .field("seed-queue-enabled", |m, v, f| assign(&mut m.seed_queue_enabled, v, f))
        .field("start-added-torrents", |m, v, f| assign(&mut m.start_added_torrents, v, f))
        .field("rename-partial-files", |m, v, f| assign(&mut m.rename_partial_files, v, f))
        .derives("encryption", &["encryptionMode"])
        .build()
});

impl FieldSet for SessionSettingsMutator {
    fn registry() -> &'static FieldRegistry<Self> {
        &SESSION_MUTATOR_FIELDS
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.changes
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.changes
    }
}

impl AssignFrom<SessionSettings> for SessionSettingsMutator {
    fn assign_from(&mut self, s: &SessionSettings) {
        let mut changed = Vec::new();

        sync(&mut self.download_dir, &Some(s.download_dir.clone()), "download-dir", &mut changed);
        sync(&mut self.incomplete_dir, &Some(s.incomplete_dir.clone()), "incomplete-dir", &mut changed);
        sync(&mut self.incomplete_dir_enabled, &Some(s.incomplete_dir_enabled), "incomplete-dir-enabled", &mut changed);
        sync(&mut self.speed_limit_down, &Some(s.speed_limit_down), "speed-limit-down", &mut changed);
        sync(&mut self.speed_limit_down_enabled, &Some(s.speed_limit_down_enabled), "speed-limit-down-enabled", &mut changed);
        sync(&mut self.speed_limit_up, &Some(s.speed_limit_up), "speed-limit-up", &mut changed);
        sync(&mut self.speed_limit_up_enabled, &Some(s.speed_limit_up_enabled), "speed-limit-up-enabled", &mut changed);
        sync(&mut self.alt_speed_down, &Some(s.alt_speed_down), "alt-speed-down", &mut changed);
        sync(&mut self.alt_speed_up, &Some(s.alt_speed_up), "alt-speed-up", &mut changed);
        sync(&mut self.alt_speed_enabled, &Some(s.alt_speed_enabled), "alt-speed-enabled", &mut changed);
        sync(&mut self.peer_port, &Some(s.peer_port), "peer-port", &mut changed);
        sync(&mut self.peer_port_random_on_start, &Some(s.peer_port_random_on_start), "peer-port-random-on-start", &mut changed);
        sync(&mut self.port_forwarding_enabled, &Some(s.port_forwarding_enabled), "port-forwarding-enabled", &mut changed);
        sync(&mut self.peer_limit_global, &Some(s.peer_limit_global), "peer-limit-global", &mut changed);
        sync(&mut self.peer_limit_per_torrent, &Some(s.peer_limit_per_torrent), "peer-limit-per-torrent", &mut changed);
        sync(&mut self.pex_enabled, &Some(s.pex_enabled), "pex-enabled", &mut changed);
        sync(&mut self.dht_enabled, &Some(s.dht_enabled), "dht-enabled", &mut changed);
        sync(&mut self.lpd_enabled, &Some(s.lpd_enabled), "lpd-enabled", &mut changed);
        sync(&mut self.utp_enabled, &Some(s.utp_enabled), "utp-enabled", &mut changed);
        sync(&mut self.encryption, &Some(s.encryption.clone()), "encryption", &mut changed);
        sync(&mut self.seed_ratio_limit, &Some(s.seed_ratio_limit), "seedRatioLimit", &mut changed);
        sync(&mut self.seed_ratio_limited, &Some(s.seed_ratio_limited), "seedRatioLimited", &mut changed);
        sync(&mut self.idle_seeding_limit, &Some(s.idle_seeding_limit), "idle-seeding-limit", &mut changed);
        sync(&mut self.idle_seeding_limit_enabled, &Some(s.idle_seeding_limit_enabled), "idle-seeding-limit-enabled", &mut changed);
        sync(&mut self.download_queue_size, &Some(s.download_queue_size), "download-queue-size", &mut changed);
        sync(&mut self.download_queue_enabled, &Some(s.download_queue_enabled), "download-queue-enabled", &mut changed);
        sync(&mut self.seed_queue_size, &Some(s.seed_queue_size), "seed-queue-size", &mut changed);
        sync(&mut self.seed_queue_enabled, &Some(s.seed_queue_enabled), "seed-queue-enabled", &mut changed);
        sync(&mut self.start_added_torrents, &Some(s.start_added_torrents), "start-added-torrents", &mut changed);
        sync(&mut self.rename_partial_files, &Some(s.rename_partial_files), "rename-partial-files", &mut changed);

        accept_snapshot(self, &changed);
    }
}

impl AssignFrom<SessionSettingsMutator> for SessionSettingsMutator {
    fn assign_from(&mut self, source: &SessionSettingsMutator) {
        let mut changed = Vec::new();

        sync(&mut self.download_dir, &source.download_dir, "download-dir", &mut changed);
        sync(&mut self.incomplete_dir, &source.incomplete_dir, "incomplete-dir", &mut changed);
        sync(&mut self.incomplete_dir_enabled, &source.incomplete_dir_enabled, "incomplete-dir-enabled", &mut changed);
        sync(&mut self.speed_limit_down, &source.speed_limit_down, "speed-limit-down", &mut changed);
        sync(&mut self.speed_limit_down_enabled, &source.speed_limit_down_enabled, "speed-limit-down-enabled", &mut changed);
        sync(&mut self.speed_limit_up, &source.speed_limit_up, "speed-limit-up", &mut changed);
        sync(&mut self.speed_limit_up_enabled, &source.speed_limit_up_enabled, "speed-limit-up-enabled", &mut changed);
        sync(&mut self.alt_speed_down, &source.alt_speed_down, "alt-speed-down", &mut changed);
        sync(&mut self.alt_speed_up, &source.alt_speed_up, "alt-speed-up", &mut changed);
        sync(&mut self.alt_speed_enabled, &source.alt_speed_enabled, "alt-speed-enabled", &mut changed);
        sync(&mut self.peer_port, &source.peer_port, "peer-port", &mut changed);
        sync(&mut self.peer_port_random_on_start, &source.peer_port_random_on_start, "peer-port-random-on-start", &mut changed);
        sync(&mut self.port_forwarding_enabled, &source.port_forwarding_enabled, "port-forwarding-enabled", &mut changed);
        sync(&mut self.peer_limit_global, &source.peer_limit_global, "peer-limit-global", &mut changed);
        sync(&mut self.peer_limit_per_torrent, &source.peer_limit_per_torrent, "peer-limit-per-torrent", &mut changed);
        sync(&mut self.pex_enabled, &source.pex_enabled, "pex-enabled", &mut changed);
        sync(&mut self.dht_enabled, &source.dht_enabled, "dht-enabled", &mut changed);
        sync(&mut self.lpd_enabled, &source.lpd_enabled, "lpd-enabled", &mut changed);
        sync(&mut self.utp_enabled, &source.utp_enabled, "utp-enabled", &mut changed);
        sync(&mut self.encryption, &source.encryption, "encryption", &mut changed);
        sync(&mut self.seed_ratio_limit, &source.seed_ratio_limit, "seedRatioLimit", &mut changed);
        sync(&mut self.seed_ratio_limited, &source.seed_ratio_limited, "seedRatioLimited", &mut changed);
        sync(&mut self.idle_seeding_limit, &source.idle_seeding_limit, "idle-seeding-limit", &mut changed);
        sync(&mut self.idle_seeding_limit_enabled, &source.idle_seeding_limit_enabled, "idle-seeding-limit-enabled", &mut changed);
        sync(&mut self.download_queue_size, &source.download_queue_size, "download-queue-size", &mut changed);
        sync(&mut self.download_queue_enabled, &source.download_queue_enabled, "download-queue-enabled", &mut changed);
        sync(&mut self.seed_queue_size, &source.seed_queue_size, "seed-queue-size", &mut changed);
        sync(&mut self.seed_queue_enabled, &source.seed_queue_enabled, "seed-queue-enabled", &mut changed);
        sync(&mut self.start_added_torrents, &source.start_added_torrents, "start-added-torrents", &mut changed);
        sync(&mut self.rename_partial_files, &source.rename_partial_files, "rename-partial-files", &mut changed);

        accept_snapshot(self, &changed);
    }
}
