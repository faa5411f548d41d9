//! Write-intent counterparts of the mutable entities.
//!
//! A mutator starts empty (every field `None`, not dirty). Callers either
//! set individual fields through [`crate::FieldSet::set_field`] or seed it
//! from a live entity with [`AssignFrom::assign_from`]; the session client
//! then sends only the fields that are present.

pub mod file;
pub mod session;
pub mod torrent;

/// Accept a known-good snapshot.
///
/// Copies only the fields the protocol allows setting, is idempotent, and
/// always leaves the target clean (`has_changes() == false`).
pub trait AssignFrom<Source: ?Sized> {
    fn assign_from(&mut self, source: &Source);
}
