//! Client core for a remote torrent daemon.
//!
//! - [`bencode`] / [`metainfo`]: decoding `.torrent` files
//! - [`rpc`]: typed request/response envelopes
//! - [`session`]: the token handshake and single-flight exchange loop
//! - [`config`]: where the daemon is and how to log in

pub mod bencode;
pub mod config;
pub mod error;
pub mod metainfo;
pub mod rpc;
pub mod session;
pub mod transport;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, CoreError, DecodeError, ErrorKind, SessionError};
pub use metainfo::{FileEntry, FileLayout, MetaInfo};
pub use session::{RpcSession, SessionState};
pub use transport::{HttpTransport, Transport};

pub const DEFAULT_DAEMON_HOST: &str = "localhost";
pub const DEFAULT_DAEMON_URL: &str = const_format::concatcp!(
    "http://",
    DEFAULT_DAEMON_HOST,
    ":",
    models::connection::DEFAULT_RPC_PORT,
    models::connection::DEFAULT_RPC_PATH
);
