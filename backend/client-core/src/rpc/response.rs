use crate::error::session::SessionError;

use models::Torrent;

use serde::Deserialize;

/// `torrent-get` arguments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TorrentList {
    pub torrents: Vec<Torrent>,
    /// Ids removed since the last `recently-active` query.
    pub removed: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedTorrent {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hash_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(AddedTorrent),
    /// The daemon already had this torrent.
    Duplicate(AddedTorrent),
}

impl AddOutcome {
    pub fn torrent(&self) -> &AddedTorrent {
        match self {
            AddOutcome::Added(torrent) | AddOutcome::Duplicate(torrent) => torrent,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, AddOutcome::Duplicate(_))
    }
}

/// `torrent-add` arguments: exactly one of the two keys is expected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TorrentAddResult {
    #[serde(rename = "torrent-added", default)]
    pub added: Option<AddedTorrent>,
    #[serde(rename = "torrent-duplicate", default)]
    pub duplicate: Option<AddedTorrent>,
}

impl TorrentAddResult {
    pub fn into_outcome(self) -> Result<AddOutcome, SessionError> {
        match (self.added, self.duplicate) {
            (Some(added), _) => Ok(AddOutcome::Added(added)),
            (None, Some(duplicate)) => Ok(AddOutcome::Duplicate(duplicate)),
            (None, None) => Err(SessionError::decode(
                "torrent-add response names neither an added nor a duplicate torrent",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FreeSpaceInfo {
    pub path: String,
    #[serde(rename = "size-bytes")]
    pub size_bytes: i64,
    #[serde(rename = "total_size", default)]
    pub total_size: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PortTestResult {
    #[serde(rename = "port-is-open", default)]
    pub port_is_open: bool,
}
