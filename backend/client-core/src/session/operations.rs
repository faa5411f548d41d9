use crate::error::CoreError;
use crate::error::session::SessionError;
use crate::metainfo::MetaInfo;
use crate::rpc::Ids;
use crate::rpc::request::{
    AddOptions, FreeSpace, PortTest, SessionGet, SessionSet, SessionStatsRequest, TorrentAdd,
    TorrentGet, TorrentReannounce, TorrentRemove, TorrentSet, TorrentSetLocation, TorrentStart,
    TorrentStartNow, TorrentStop, TorrentVerify,
};
use crate::rpc::response::{AddOutcome, FreeSpaceInfo, TorrentList};
use crate::session::RpcSession;
use crate::transport::Transport;

use models::{FieldSet, SessionSettings, SessionSettingsMutator, SessionStats, Torrent, TorrentMutator};

use log::{debug, info};

impl<T: Transport> RpcSession<T> {
    /// Every torrent with the fields the main list shows.
    pub async fn list_torrents(&self) -> Result<Vec<Torrent>, SessionError> {
        let list = self.send(&TorrentGet::new(Ids::All, Torrent::LIST_FIELDS)).await?;
        Ok(list.torrents)
    }

    /// Torrents changed since the previous call, plus ids removed meanwhile.
    pub async fn recently_active(&self) -> Result<TorrentList, SessionError> {
        self.send(&TorrentGet::new(Ids::RecentlyActive, Torrent::LIST_FIELDS))
            .await
    }

    /// Everything the details view needs for one torrent. `None` if the daemon no longer has it.
    pub async fn torrent_details(&self, id: i64) -> Result<Option<Torrent>, SessionError> {
        let list = self.send(&TorrentGet::new(id, Torrent::DETAIL_FIELDS)).await?;
        Ok(list.torrents.into_iter().find(|torrent| torrent.id == id))
    }

    /// Send pending changes with `torrent-set`.
    ///
    /// Returns `false` without contacting the daemon when nothing is pending.
    /// On success the mutator is marked applied.
    pub async fn mutate_torrents(
        &self,
        ids: impl Into<Ids>,
        mutator: &mut TorrentMutator,
    ) -> Result<bool, SessionError> {
        if !mutator.has_changes() || mutator.is_empty() {
            debug!("torrent-set skipped: no pending changes");
            return Ok(false);
        }

        self.send(&TorrentSet {
            ids: ids.into(),
            changes: &*mutator,
        })
        .await?;

        mutator.mark_applied();
        Ok(true)
    }

    pub async fn start_torrents(&self, ids: impl Into<Ids>) -> Result<(), SessionError> {
        self.send(&TorrentStart::new(ids)).await.map(drop)
    }

    pub async fn start_torrents_now(&self, ids: impl Into<Ids>) -> Result<(), SessionError> {
        self.send(&TorrentStartNow::new(ids)).await.map(drop)
    }

    pub async fn stop_torrents(&self, ids: impl Into<Ids>) -> Result<(), SessionError> {
        self.send(&TorrentStop::new(ids)).await.map(drop)
    }

    pub async fn verify_torrents(&self, ids: impl Into<Ids>) -> Result<(), SessionError> {
        self.send(&TorrentVerify::new(ids)).await.map(drop)
    }

    pub async fn reannounce_torrents(&self, ids: impl Into<Ids>) -> Result<(), SessionError> {
        self.send(&TorrentReannounce::new(ids)).await.map(drop)
    }

    pub async fn set_location(
        &self,
        ids: impl Into<Ids>,
        location: impl Into<String>,
        move_data: bool,
    ) -> Result<(), SessionError> {
        self.send(&TorrentSetLocation {
            ids: ids.into(),
            location: location.into(),
            move_data,
        })
        .await
        .map(drop)
    }

    pub async fn remove_torrents(
        &self,
        ids: impl Into<Ids>,
        delete_local_data: bool,
    ) -> Result<(), SessionError> {
        self.send(&TorrentRemove {
            ids: ids.into(),
            delete_local_data,
        })
        .await
        .map(drop)
    }

    pub async fn session_settings(&self) -> Result<SessionSettings, SessionError> {
        self.send(&SessionGet::all()).await
    }

    /// Send pending changes with `session-set`. Same contract as [`RpcSession::mutate_torrents`].
    pub async fn mutate_session(
        &self,
        mutator: &mut SessionSettingsMutator,
    ) -> Result<bool, SessionError> {
        if !mutator.has_changes() || mutator.is_empty() {
            debug!("session-set skipped: no pending changes");
            return Ok(false);
        }

        self.send(&SessionSet { changes: &*mutator }).await?;

        mutator.mark_applied();
        Ok(true)
    }

    pub async fn session_stats(&self) -> Result<SessionStats, SessionError> {
        self.send(&SessionStatsRequest {}).await
    }

    /// Add a torrent from the raw bytes of a `.torrent` file.
    ///
    /// The bytes are decoded locally first so a corrupt file never reaches
    /// the daemon.
    pub async fn add_torrent_file(
        &self,
        contents: &[u8],
        options: AddOptions,
    ) -> Result<AddOutcome, CoreError> {
        let metainfo = MetaInfo::from_bytes(contents)?;
        debug!("Adding '{}' ({})", metainfo.name, metainfo.info_hash_hex());

        let outcome = self
            .send(&TorrentAdd::file_contents(contents, options))
            .await?
            .into_outcome()?;
        log_added(&outcome);
        Ok(outcome)
    }

    pub async fn add_torrent_metainfo(
        &self,
        metainfo: &MetaInfo,
        options: AddOptions,
    ) -> Result<AddOutcome, SessionError> {
        let outcome = self
            .send(&TorrentAdd::metainfo(metainfo, options))
            .await?
            .into_outcome()?;
        log_added(&outcome);
        Ok(outcome)
    }

    /// Add from a magnet link or URL fetched by the daemon.
    pub async fn add_torrent_link(
        &self,
        link: &str,
        options: AddOptions,
    ) -> Result<AddOutcome, SessionError> {
        let outcome = self
            .send(&TorrentAdd::link(link, options))
            .await?
            .into_outcome()?;
        log_added(&outcome);
        Ok(outcome)
    }

    /// Free space at `path` on the daemon's host.
    pub async fn free_space(&self, path: impl Into<String>) -> Result<FreeSpaceInfo, SessionError> {
        self.send(&FreeSpace { path: path.into() }).await
    }

    /// Whether the daemon's peer port is reachable from outside.
    pub async fn port_test(&self) -> Result<bool, SessionError> {
        Ok(self.send(&PortTest {}).await?.port_is_open)
    }
}

fn log_added(outcome: &AddOutcome) {
    let torrent = outcome.torrent();
    if outcome.is_duplicate() {
        info!("Torrent '{}' (id {}) already present", torrent.name, torrent.id);
    } else {
        info!("Added torrent '{}' (id {})", torrent.name, torrent.id);
    }
}
