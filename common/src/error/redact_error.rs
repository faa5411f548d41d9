use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// A secret was asked to leave the process in serialized form.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Secret Serialization Error: {type_name} is read-only, use expose() {location}")]
    SerializationRefused {
        type_name: &'static str,
        location: ErrorLocation,
    },
}
