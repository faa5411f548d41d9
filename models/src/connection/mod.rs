//! Where and how to reach one daemon.

pub mod builder;

use common::RedactedSecret;

use std::time::Duration;

pub const DEFAULT_RPC_PORT: u16 = 9091;
pub const DEFAULT_RPC_PATH: &str = "/transmission/rpc";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Basic-auth credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: RedactedSecret,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: RedactedSecret::new(password),
        }
    }
}

/// Validated connection settings. Build with [`crate::ConnectionConfigBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub rpc_path: String,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// `http(s)://host:port/rpc/path`. IPv6 literals are bracketed.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!("{scheme}://{host}:{}{}", self.port, self.rpc_path)
    }

    /// Whether `other` points at the same daemon endpoint.
    ///
    /// Credentials and timeout are not part of the address.
    pub fn same_address(&self, other: &ConnectionConfig) -> bool {
        self.host.eq_ignore_ascii_case(&other.host)
            && self.port == other.port
            && self.secure == other.secure
            && self.rpc_path == other.rpc_path
    }
}
