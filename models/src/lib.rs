//! Daemon-side state as typed data.
//!
//! Entities mirror what the daemon reports (`torrent-get`, `session-get`,
//! `session-stats`). Mutators carry only the fields a caller wants to change
//! and serialize to the sparse argument objects of `torrent-set` and
//! `session-set`.
//!
//! Both entities and mutators can be updated one field at a time by wire
//! name through [`FieldSet::set_field`], which looks the name up in a
//! per-type [`FieldRegistry`] instead of reflecting over the struct.

pub mod connection;
pub mod error;
pub mod field;
pub mod files;
pub mod mutator;
pub mod peer;
pub mod session;
pub mod stats;
pub mod torrent;
pub mod tracker;

pub use connection::builder::ConnectionConfigBuilder;
pub use connection::{ConnectionConfig, Credentials};
pub use error::model_error::ModelError;
pub use field::coerce::Coerce;
pub use field::registry::{FieldRegistry, FieldRegistryBuilder};
pub use field::{ChangeTracker, FieldSet};
pub use files::{FileStat, Priority, TorrentFile};
pub use mutator::file::FileStatMutator;
pub use mutator::session::SessionSettingsMutator;
pub use mutator::torrent::TorrentMutator;
pub use mutator::AssignFrom;
pub use peer::Peer;
pub use session::{EncryptionMode, SessionSettings};
pub use stats::{SessionStats, TransferTotals};
pub use torrent::{SeedLimitPolicy, Torrent, TorrentStatus};
pub use tracker::TrackerStat;

#[cfg(test)]
mod tests;
