//! The HTTP exchange underneath a session, behind a trait so the session
//! loop can run against a simulated daemon.

pub mod http;

pub use http::HttpTransport;

use crate::error::session::SessionError;

use common::HttpStatusCode;
use models::Credentials;

use std::future::Future;

use url::Url;

/// Header carrying the daemon's anti-forgery session token.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: Url,
    pub body: Vec<u8>,
    pub session_id: Option<String>,
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: HttpStatusCode,
    /// Value of [`SESSION_ID_HEADER`], if the daemon sent one.
    pub session_id: Option<String>,
    pub body: Vec<u8>,
}

/// One POST to the daemon.
///
/// Implementations report connection-level failures as
/// [`SessionError::Transport`]; status codes are the session's business and
/// come back inside [`TransportResponse`].
pub trait Transport: Send + Sync {
    fn post(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, SessionError>> + Send;
}
