use crate::ModelError;
use crate::connection::{
    ConnectionConfig, Credentials, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RPC_PATH, DEFAULT_RPC_PORT,
};

use std::time::Duration;

/// Builder for creating validated ConnectionConfig instances.
///
/// Only the host is required; everything else falls back to the daemon's
/// defaults (port 9091, plain HTTP, `/transmission/rpc`, 10 s timeout).
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    secure: Option<bool>,
    rpc_path: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
}

impl ConnectionConfigBuilder {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn with_rpc_path(mut self, path: impl Into<String>) -> Self {
        self.rpc_path = Some(path.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_optional_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the ConnectionConfig with validation.
    #[track_caller]
    pub fn build(self) -> Result<ConnectionConfig, ModelError> {
        let host = self
            .host
            .map(|h| h.trim().to_string())
            .ok_or_else(|| ModelError::validation("Host is required"))?;

        if host.is_empty() {
            return Err(ModelError::validation("Host cannot be empty"));
        }

        if host.contains("://") || host.contains('/') {
            return Err(ModelError::validation(format!(
                "Host must be a bare name or address, got: {host}"
            )));
        }

        let port = self.port.unwrap_or(DEFAULT_RPC_PORT);
        if port == 0 {
            return Err(ModelError::validation("Port must be non-zero"));
        }

        let rpc_path = self
            .rpc_path
            .unwrap_or_else(|| DEFAULT_RPC_PATH.to_string());
        if !rpc_path.starts_with('/') {
            return Err(ModelError::validation(format!(
                "RPC path must start with '/': {rpc_path}"
            )));
        }

        if let Some(credentials) = &self.credentials
            && credentials.username.is_empty()
        {
            return Err(ModelError::validation(
                "Username cannot be empty when credentials are given",
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if timeout.is_zero() {
            return Err(ModelError::validation("Timeout must be non-zero"));
        }

        Ok(ConnectionConfig {
            host,
            port,
            secure: self.secure.unwrap_or(false),
            rpc_path,
            credentials: self.credentials,
            timeout,
        })
    }
}
