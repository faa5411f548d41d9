use serde::{Deserialize, Serialize};

/// A connected peer of one torrent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Peer {
    pub address: String,
    pub port: u16,
    pub client_name: String,
    pub flag_str: String,
    pub progress: f64,
    pub rate_to_client: i64,
    pub rate_to_peer: i64,
    pub is_encrypted: bool,
    pub is_downloading_from: bool,
    pub is_uploading_to: bool,
    pub is_incoming: bool,
    #[serde(rename = "isUTP")]
    pub is_utp: bool,
}
