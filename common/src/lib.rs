//! Shared building blocks for the tremote workspace.
//!
//! Workspace layout:
//!
//! - **common** (this crate): error locations, secrets, HTTP status classification
//! - **models**: daemon entities and mutators
//! - **client-core**: metadata decoding and the RPC session client
//! - **tremote**: command-line front end wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::{HttpStatusCode, StatusClass};
pub use redacted_secret::RedactedSecret;

#[cfg(test)]
mod tests;
