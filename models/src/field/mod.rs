//! Set-by-name support shared by entities and mutators.

pub mod coerce;
pub mod registry;

use crate::ModelError;
use crate::field::coerce::Coerce;
use crate::field::registry::FieldRegistry;

use std::fmt;
use std::sync::Arc;

use log::trace;
use serde_json::Value;

type Observer = Arc<dyn Fn(&str) + Send + Sync>;

/// Dirty flag plus change observers.
///
/// Observers are shared between clones: a cloned mutator keeps notifying
/// whoever subscribed to the original.
#[derive(Clone, Default)]
pub struct ChangeTracker {
    dirty: bool,
    observers: Vec<Observer>,
}

impl ChangeTracker {
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn subscribe(&mut self, observer: impl Fn(&str) + Send + Sync + 'static) {
        self.observers.push(Arc::new(observer));
    }

    /// A field was set by a caller: mark dirty and notify.
    pub fn record(&mut self, field: &str, derived: &[&str]) {
        self.dirty = true;
        self.notify(field, derived);
    }

    /// A snapshot was accepted: notify the changed fields, then clear.
    pub fn accept(&mut self, changed: &[(&str, &[&str])]) {
        for (field, derived) in changed {
            self.notify(field, derived);
        }
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.dirty = false;
    }

    fn notify(&self, field: &str, derived: &[&str]) {
        for observer in &self.observers {
            observer(field);
            for name in derived {
                observer(name);
            }
        }
    }
}

impl fmt::Debug for ChangeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeTracker")
            .field("dirty", &self.dirty)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Types whose fields can be assigned by wire name.
pub trait FieldSet: Sized + 'static {
    fn registry() -> &'static FieldRegistry<Self>;

    fn tracker(&self) -> &ChangeTracker;

    fn tracker_mut(&mut self) -> &mut ChangeTracker;

    /// Assign one field by wire name.
    ///
    /// Returns `Ok(false)` for unknown names and for values equal to the
    /// current one; `Ok(true)` when the field changed, in which case the
    /// target is marked dirty and observers hear about the field and every
    /// field derived from it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Coercion`] if the value cannot be represented
    /// in the field's declared type.
    fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<bool, ModelError> {
        let registry = Self::registry();

        let Some((canonical, setter)) = registry.lookup(name) else {
            trace!("Ignoring unknown field '{name}'");
            return Ok(false);
        };

        let changed = setter(self, &value.into(), canonical)?;
        if changed {
            self.tracker_mut()
                .record(canonical, registry.dependents_of(canonical));
        }

        Ok(changed)
    }

    fn has_changes(&self) -> bool {
        self.tracker().is_dirty()
    }

    fn subscribe(&mut self, observer: impl Fn(&str) + Send + Sync + 'static) {
        self.tracker_mut().subscribe(observer);
    }

    /// The daemon accepted the pending changes.
    fn mark_applied(&mut self) {
        self.tracker_mut().clear();
    }
}

/// Coerce `value` into `slot`'s type and store it. Returns whether it changed.
pub fn assign<F>(slot: &mut F, value: &Value, field: &'static str) -> Result<bool, ModelError>
where
    F: Coerce + PartialEq,
{
    let coerced = F::coerce(value).ok_or_else(|| ModelError::coercion(field, F::type_name(), value))?;

    if *slot == coerced {
        return Ok(false);
    }

    *slot = coerced;
    Ok(true)
}

/// Copy `source` into `slot` when they differ, recording the field name.
pub(crate) fn sync<F: Clone + PartialEq>(
    slot: &mut F,
    source: &F,
    field: &'static str,
    changed: &mut Vec<&'static str>,
) {
    if slot != source {
        *slot = source.clone();
        changed.push(field);
    }
}

/// Accept a snapshot on `target`: notify `changed` fields (with their
/// derived fields) and clear the dirty flag.
pub(crate) fn accept_snapshot<T: FieldSet>(target: &mut T, changed: &[&'static str]) {
    let registry = T::registry();
    let notifications: Vec<(&str, &[&str])> = changed
        .iter()
        .map(|name| (*name, registry.dependents_of(name)))
        .collect();

    target.tracker_mut().accept(&notifications);
}
