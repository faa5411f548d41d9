use crate::ModelError;

use std::collections::HashMap;

use serde_json::Value;

/// Typed setter for one field: coerces `value`, stores it and reports
/// whether the stored value changed. The third argument is the wire name,
/// passed through so coercion errors can name the field.
pub type Setter<T> = fn(&mut T, &Value, &'static str) -> Result<bool, ModelError>;

/// Name-indexed setters plus the derived-field dependency table of one type.
///
/// Built once per type (see [`crate::FieldSet::registry`]) and shared.
pub struct FieldRegistry<T: 'static> {
    setters: HashMap<&'static str, Setter<T>>,
    dependents: HashMap<&'static str, &'static [&'static str]>,
}

impl<T: 'static> FieldRegistry<T> {
    pub fn builder() -> FieldRegistryBuilder<T> {
        FieldRegistryBuilder {
            setters: HashMap::new(),
            dependents: HashMap::new(),
        }
    }

    /// Canonical name and setter for `name`, if the field exists.
    pub fn lookup(&self, name: &str) -> Option<(&'static str, Setter<T>)> {
        self.setters
            .get_key_value(name)
            .map(|(canonical, setter)| (*canonical, *setter))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    /// Derived fields whose value is computed from `name`.
    pub fn dependents_of(&self, name: &str) -> &'static [&'static str] {
        self.dependents.get(name).copied().unwrap_or(&[])
    }

    /// Settable field names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.setters.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.setters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

/// Fluent construction of a [`FieldRegistry`].
pub struct FieldRegistryBuilder<T: 'static> {
    setters: HashMap<&'static str, Setter<T>>,
    dependents: HashMap<&'static str, &'static [&'static str]>,
}

impl<T: 'static> FieldRegistryBuilder<T> {
    pub fn field(mut self, name: &'static str, setter: Setter<T>) -> Self {
        self.setters.insert(name, setter);
        self
    }

    /// Declare that changing `name` also changes each of `derived`.
    pub fn derives(mut self, name: &'static str, derived: &'static [&'static str]) -> Self {
        self.dependents.insert(name, derived);
        self
    }

    pub fn build(self) -> FieldRegistry<T> {
        debug_assert!(
            self.dependents.keys().all(|name| self.setters.contains_key(name)),
            "dependency declared for an unregistered field"
        );

        FieldRegistry {
            setters: self.setters,
            dependents: self.dependents,
        }
    }
}
