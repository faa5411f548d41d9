use crate::metainfo::MetaInfo;
use crate::rpc::response::{FreeSpaceInfo, PortTestResult, TorrentAddResult, TorrentList};
use crate::rpc::{Ids, NoArguments, RpcMethod};

use models::{SessionSettings, SessionSettingsMutator, SessionStats, TorrentMutator};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionGet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl SessionGet {
    pub fn all() -> Self {
        Self::default()
    }

    /// Version fields only: the connection probe.
    pub fn probe() -> Self {
        Self {
            fields: Some(
                SessionSettings::PROBE_FIELDS
                    .iter()
                    .map(|field| field.to_string())
                    .collect(),
            ),
        }
    }
}

impl RpcMethod for SessionGet {
    const METHOD: &'static str = "session-get";
    type Output = SessionSettings;
}

#[derive(Debug, Serialize)]
pub struct SessionSet<'a> {
    #[serde(flatten)]
    pub changes: &'a SessionSettingsMutator,
}

impl RpcMethod for SessionSet<'_> {
    const METHOD: &'static str = "session-set";
    type Output = NoArguments;
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStatsRequest {}

impl RpcMethod for SessionStatsRequest {
    const METHOD: &'static str = "session-stats";
    type Output = SessionStats;
}

#[derive(Debug, Clone, Serialize)]
pub struct TorrentGet {
    #[serde(skip_serializing_if = "Ids::is_all")]
    pub ids: Ids,
    pub fields: Vec<String>,
}

impl TorrentGet {
    pub fn new(ids: impl Into<Ids>, fields: &[&str]) -> Self {
        Self {
            ids: ids.into(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }
}

impl RpcMethod for TorrentGet {
    const METHOD: &'static str = "torrent-get";
    type Output = TorrentList;
}

#[derive(Debug, Serialize)]
pub struct TorrentSet<'a> {
    #[serde(skip_serializing_if = "Ids::is_all")]
    pub ids: Ids,
    #[serde(flatten)]
    pub changes: &'a TorrentMutator,
}

impl RpcMethod for TorrentSet<'_> {
    const METHOD: &'static str = "torrent-set";
    type Output = NoArguments;
}

/// Optional settings for a torrent being added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddOptions {
    #[serde(rename = "download-dir", skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(rename = "bandwidthPriority", skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<i32>,
    #[serde(rename = "peer-limit", skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i64>,
}

impl AddOptions {
    pub fn with_download_dir(mut self, dir: impl Into<String>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = Some(paused);
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }
}

/// `torrent-add` with either a link (`filename`) or file contents (`metainfo`).
#[derive(Debug, Clone, Serialize)]
pub struct TorrentAdd {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Base64 of the `.torrent` file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metainfo: Option<String>,
    #[serde(flatten)]
    pub options: AddOptions,
}

impl TorrentAdd {
    /// Magnet link or URL the daemon fetches itself.
    pub fn link(link: impl Into<String>, options: AddOptions) -> Self {
        Self {
            filename: Some(link.into()),
            metainfo: None,
            options,
        }
    }

    pub fn file_contents(contents: &[u8], options: AddOptions) -> Self {
        Self {
            filename: None,
            metainfo: Some(STANDARD.encode(contents)),
            options,
        }
    }

    pub fn metainfo(metainfo: &MetaInfo, options: AddOptions) -> Self {
        Self {
            filename: None,
            metainfo: Some(metainfo.to_base64()),
            options,
        }
    }
}

impl RpcMethod for TorrentAdd {
    const METHOD: &'static str = "torrent-add";
    type Output = TorrentAddResult;
}

#[derive(Debug, Clone, Serialize)]
pub struct TorrentRemove {
    #[serde(skip_serializing_if = "Ids::is_all")]
    pub ids: Ids,
    #[serde(rename = "delete-local-data")]
    pub delete_local_data: bool,
}

impl RpcMethod for TorrentRemove {
    const METHOD: &'static str = "torrent-remove";
    type Output = NoArguments;
}

/// Calls whose only argument is the torrent selection.
macro_rules! torrent_action {
    ($(#[$doc:meta])* $name:ident => $method:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize)]
        pub struct $name {
            #[serde(skip_serializing_if = "Ids::is_all")]
            pub ids: Ids,
        }

        impl $name {
            pub fn new(ids: impl Into<Ids>) -> Self {
                Self { ids: ids.into() }
            }
        }

        impl RpcMethod for $name {
            const METHOD: &'static str = $method;
            type Output = NoArguments;
        }
    };
}

torrent_action!(TorrentStart => "torrent-start");
torrent_action!(
    /// Start ahead of the download queue.
    TorrentStartNow => "torrent-start-now"
);
torrent_action!(TorrentStop => "torrent-stop");
torrent_action!(TorrentVerify => "torrent-verify");
torrent_action!(TorrentReannounce => "torrent-reannounce");

#[derive(Debug, Clone, Serialize)]
pub struct TorrentSetLocation {
    #[serde(skip_serializing_if = "Ids::is_all")]
    pub ids: Ids,
    pub location: String,
    /// Move existing data; otherwise the daemon looks for it at `location`.
    #[serde(rename = "move")]
    pub move_data: bool,
}

impl RpcMethod for TorrentSetLocation {
    const METHOD: &'static str = "torrent-set-location";
    type Output = NoArguments;
}

#[derive(Debug, Clone, Serialize)]
pub struct FreeSpace {
    pub path: String,
}

impl RpcMethod for FreeSpace {
    const METHOD: &'static str = "free-space";
    type Output = FreeSpaceInfo;
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortTest {}

impl RpcMethod for PortTest {
    const METHOD: &'static str = "port-test";
    type Output = PortTestResult;
}
