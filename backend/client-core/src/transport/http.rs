use crate::error::session::SessionError;
use crate::transport::{SESSION_ID_HEADER, Transport, TransportRequest, TransportResponse};

use common::HttpStatusCode;

use std::time::Duration;

use log::trace;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`Transport`] over a shared `reqwest` client.
///
/// Overall request deadlines are enforced by the session, not here.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, SessionError> {
        let client = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, SessionError> {
        trace!("POST {} ({} bytes)", request.url, request.body.len());

        let mut builder = self
            .client
            .post(request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body);

        if let Some(session_id) = &request.session_id {
            builder = builder.header(SESSION_ID_HEADER, session_id.as_str());
        }
        if let Some(credentials) = &request.credentials {
            builder = builder.basic_auth(&credentials.username, Some(credentials.password.expose()));
        }

        let response = builder.send().await?;

        let status = HttpStatusCode(response.status().as_u16());
        let session_id = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            session_id,
            body,
        })
    }
}
