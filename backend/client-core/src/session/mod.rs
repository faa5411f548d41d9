//! Connection to one daemon: token handshake, tag correlation, and a
//! single in-flight request at a time.

mod operations;

use crate::error::session::SessionError;
use crate::rpc::request::SessionGet;
use crate::rpc::{RequestEnvelope, ResponseEnvelope, RpcMethod};
use crate::transport::{HttpTransport, Transport, TransportRequest};

use common::StatusClass;
use models::{ConnectionConfig, SessionSettings};

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock};
use url::Url;

/// Attempts per `send`, 409 handshakes included.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Handshaking,
    Open,
}

impl SessionState {
    fn as_u8(self) -> u8 {
        match self {
            SessionState::Closed => 0,
            SessionState::Handshaking => 1,
            SessionState::Open => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SessionState::Handshaking,
            2 => SessionState::Open,
            _ => SessionState::Closed,
        }
    }
}

/// RPC client for one daemon.
///
/// Share it behind an `Arc`; concurrent callers of [`RpcSession::send`]
/// queue on the exchange lock and reach the daemon one at a time.
pub struct RpcSession<T = HttpTransport> {
    pub(crate) transport: T,
    connection: RwLock<ConnectionConfig>,
    /// The daemon's session token. Holding this lock is holding the wire.
    session_id: Mutex<Option<String>>,
    state: AtomicU8,
    next_tag: AtomicU64,
}

impl RpcSession<HttpTransport> {
    pub fn new(connection: ConnectionConfig) -> Result<Self, SessionError> {
        Ok(Self::with_transport(connection, HttpTransport::new()?))
    }
}

impl<T: Transport> RpcSession<T> {
    pub fn with_transport(connection: ConnectionConfig, transport: T) -> Self {
        Self {
            transport,
            connection: RwLock::new(connection),
            session_id: Mutex::new(None),
            state: AtomicU8::new(SessionState::Closed.as_u8()),
            next_tag: AtomicU64::new(1),
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    pub async fn connection(&self) -> ConnectionConfig {
        self.connection.read().await.clone()
    }

    /// Replace the connection settings without contacting the daemon.
    ///
    /// Pointing at a different address closes the session and forgets the
    /// token. Waits for an in-flight request to finish first.
    pub async fn configure(&self, connection: ConnectionConfig) {
        let mut session_id = self.session_id.lock().await;
        let mut current = self.connection.write().await;

        if !current.same_address(&connection) {
            info!(
                "Daemon address changed from {} to {}",
                current.endpoint_url(),
                connection.endpoint_url()
            );
            *session_id = None;
            self.set_state(SessionState::Closed);
        }

        *current = connection;
    }

    /// Probe the daemon with a version-only `session-get`.
    ///
    /// On success the session is `Open` and the reported versions are returned.
    pub async fn open(&self) -> Result<SessionSettings, SessionError> {
        self.set_state(SessionState::Handshaking);

        match self.send(&SessionGet::probe()).await {
            Ok(settings) => {
                self.set_state(SessionState::Open);
                info!(
                    "Session open: daemon {} (RPC version {})",
                    settings.version, settings.rpc_version
                );
                Ok(settings)
            }
            Err(error) => {
                self.set_state(SessionState::Closed);
                warn!("Failed to open session: {error}");
                Err(error)
            }
        }
    }

    /// [`RpcSession::open`], reduced to whether it succeeded.
    pub async fn try_open(&self) -> bool {
        self.open().await.is_ok()
    }

    pub fn close(&self) {
        if self.state() != SessionState::Closed {
            info!("Session closed");
        }
        self.set_state(SessionState::Closed);
    }

    /// Send with the configured timeout.
    pub async fn send<M: RpcMethod>(&self, request: &M) -> Result<M::Output, SessionError> {
        let timeout = self.connection.read().await.timeout;
        self.send_with_timeout(request, timeout).await
    }

    /// Send one request and decode its response arguments.
    ///
    /// `timeout` bounds the wait for the exchange lock plus every attempt.
    /// When it expires the in-flight HTTP future is dropped, which also
    /// releases the lock. A fatal error closes an open session.
    pub async fn send_with_timeout<M: RpcMethod>(
        &self,
        request: &M,
        timeout: Duration,
    ) -> Result<M::Output, SessionError> {
        let tag = self.next_tag.fetch_add(1, Ordering::Relaxed);

        let result = match tokio::time::timeout(timeout, self.exchange(request, tag)).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::timeout(timeout)),
        };

        if let Err(error) = &result {
            if error.is_fatal() && self.state() == SessionState::Open {
                warn!("{} tag={tag} failed, closing session: {error}", M::METHOD);
                self.set_state(SessionState::Closed);
            }
        }

        result
    }

    async fn exchange<M: RpcMethod>(&self, request: &M, tag: u64) -> Result<M::Output, SessionError> {
        let body = serde_json::to_vec(&RequestEnvelope::new(request, tag))?;

        let mut session_id = self.session_id.lock().await;

        let (url, credentials) = {
            let connection = self.connection.read().await;
            (
                Url::parse(&connection.endpoint_url())?,
                connection.credentials.clone(),
            )
        };

        for attempt in 1..=MAX_ATTEMPTS {
            debug!("{} tag={tag} attempt {attempt}/{MAX_ATTEMPTS}", M::METHOD);

            let response = self
                .transport
                .post(TransportRequest {
                    url: url.clone(),
                    body: body.clone(),
                    session_id: session_id.clone(),
                    credentials: credentials.clone(),
                })
                .await?;

            match response.status.classify() {
                StatusClass::Success => {
                    let envelope = ResponseEnvelope::parse(&response.body)?;
                    envelope.verify(tag, M::METHOD)?;
                    return envelope.into_arguments();
                }
                StatusClass::SessionConflict => {
                    let fresh = response
                        .session_id
                        .filter(|id| !id.is_empty())
                        .ok_or_else(|| SessionError::missing_session_token())?;
                    warn!("Daemon issued a new session token (attempt {attempt})");
                    *session_id = Some(fresh);
                }
                StatusClass::Unauthorized => {
                    return Err(SessionError::authorization(format!(
                        "{url} rejected the credentials"
                    )));
                }
                StatusClass::Misdirected => {
                    return Err(SessionError::configuration(format!(
                        "{url} answered {}: check the RPC path and the daemon's host whitelist",
                        response.status
                    )));
                }
                StatusClass::Unexpected => {
                    return Err(SessionError::transport(
                        Some(response.status),
                        format!("{url} answered {}", response.status),
                    ));
                }
            }
        }

        Err(SessionError::handshake_exhausted(MAX_ATTEMPTS))
    }

    fn set_state(&self, state: SessionState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }
}
