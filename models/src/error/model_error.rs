use common::ErrorLocation;

use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Coercion Error: field '{field}' expects {expected}, got {value} {location}")]
    Coercion {
        field: &'static str,
        expected: String,
        value: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ModelError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn coercion(field: &'static str, expected: impl Into<String>, value: &Value) -> Self {
        ModelError::Coercion {
            field,
            expected: expected.into(),
            value: value.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
