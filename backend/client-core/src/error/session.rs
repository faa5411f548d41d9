use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use thiserror::Error as ThisError;

/// Failure category of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    ProtocolMismatch,
    Rpc,
    Authorization,
    Configuration,
    Timeout,
    Transport,
}

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Tag Mismatch Error: sent tag {expected}, received {actual:?} {location}")]
    TagMismatch {
        expected: u64,
        actual: Option<u64>,
        location: ErrorLocation,
    },

    #[error("Handshake Exhausted Error: no usable response after {attempts} attempts {location}")]
    HandshakeExhausted { attempts: u32, location: ErrorLocation },

    #[error("Missing Session Token Error: 409 response without a session id header {location}")]
    MissingSessionToken { location: ErrorLocation },

    #[error("RPC Error: {method} returned '{result}' {location}")]
    Rpc {
        method: &'static str,
        result: String,
        location: ErrorLocation,
    },

    #[error("Authorization Error: {message} {location}")]
    Authorization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Configuration Error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: no response within {timeout:?} {location}")]
    Timeout {
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        status: Option<HttpStatusCode>,
        message: String,
        location: ErrorLocation,
    },

    #[error("Response Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::TagMismatch { .. }
            | SessionError::HandshakeExhausted { .. }
            | SessionError::MissingSessionToken { .. } => ErrorKind::ProtocolMismatch,
            SessionError::Rpc { .. } => ErrorKind::Rpc,
            SessionError::Authorization { .. } => ErrorKind::Authorization,
            SessionError::Configuration { .. } => ErrorKind::Configuration,
            SessionError::Timeout { .. } => ErrorKind::Timeout,
            SessionError::Transport { .. } => ErrorKind::Transport,
            SessionError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Whether the session should be closed after this error.
    ///
    /// A daemon refusing one request (`Rpc`) or returning one undecodable
    /// body (`Decode`) leaves the connection usable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Rpc | ErrorKind::Decode)
    }

    /// HTTP status behind a transport failure, when there was one.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            SessionError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    #[track_caller]
    pub fn tag_mismatch(expected: u64, actual: Option<u64>) -> Self {
        SessionError::TagMismatch {
            expected,
            actual,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn handshake_exhausted(attempts: u32) -> Self {
        SessionError::HandshakeExhausted {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_session_token() -> Self {
        SessionError::MissingSessionToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rpc(method: &'static str, result: impl Into<String>) -> Self {
        SessionError::Rpc {
            method,
            result: result.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn authorization(message: impl Into<String>) -> Self {
        SessionError::Authorization {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        SessionError::Configuration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(timeout: Duration) -> Self {
        SessionError::Timeout {
            timeout,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(status: Option<HttpStatusCode>, message: impl Into<String>) -> Self {
        SessionError::Transport {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        SessionError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for SessionError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        SessionError::Configuration {
            message: format!("invalid endpoint URL: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for SessionError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        SessionError::Transport {
            status: error.status().map(|s| HttpStatusCode(s.as_u16())),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        SessionError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
