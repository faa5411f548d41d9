pub mod config;
pub mod decode;
pub mod session;

pub use config::ConfigError;
pub use decode::DecodeError;
pub use session::{ErrorKind, SessionError};

use models::ModelError;

use thiserror::Error;

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
