use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Malformed binary metadata. A decode either yields a whole record or one of these.
#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("Decode IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected End Of Input Error: input ends at offset {offset} {location}")]
    UnexpectedEof { offset: u64, location: ErrorLocation },

    #[error("Syntax Error: {message} at offset {offset} {location}")]
    Syntax {
        offset: u64,
        message: String,
        location: ErrorLocation,
    },

    #[error("Limit Error: {message} at offset {offset} {location}")]
    Limit {
        offset: u64,
        message: String,
        location: ErrorLocation,
    },

    #[error("Schema Error: {message} {location}")]
    Schema {
        message: String,
        location: ErrorLocation,
    },
}

impl DecodeError {
    #[track_caller]
    pub fn syntax(offset: u64, message: impl Into<String>) -> Self {
        DecodeError::Syntax {
            offset,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn limit(offset: u64, message: impl Into<String>) -> Self {
        DecodeError::Limit {
            offset,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn eof(offset: u64) -> Self {
        DecodeError::UnexpectedEof {
            offset,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn schema(message: impl Into<String>) -> Self {
        DecodeError::Schema {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for DecodeError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        DecodeError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: error,
        }
    }
}
