//! command::options
//!
//! Per-command option value store.
//!
//! # Invariants
//!
//! - The set of option names is fixed when the command is registered
//! - Setting a value for an unregistered name is an error, never an insert

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from option assignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("Unknown option '{0}'")]
    Unknown(String),
}

/// Registered option names and their values for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    slots: BTreeMap<String, Option<String>>,
}

impl OptionValues {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option name with no value.
    ///
    /// Re-registering an existing name leaves its value unchanged.
    pub fn register(&mut self, name: impl Into<String>) {
        self.slots.entry(name.into()).or_insert(None);
    }

    /// Whether `name` was registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Set the value of a registered option.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), OptionError> {
        match self.slots.get_mut(name) {
            Some(slot) => {
                *slot = Some(value.into());
                Ok(())
            }
            None => Err(OptionError::Unknown(name.to_string())),
        }
    }

    /// Value of an option, if registered and set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|v| v.as_deref())
    }

    /// Whether an option was supplied.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Options that carry a value, sorted by name.
    pub fn with_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no options are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(names: &[&str]) -> OptionValues {
        let mut values = OptionValues::new();
        for name in names {
            values.register(*name);
        }
        values
    }

    #[test]
    fn registered_options_start_unset() {
        let values = store(&["force", "dry-run"]);
        assert!(values.is_registered("force"));
        assert!(!values.is_set("force"));
        assert_eq!(values.get("force"), None);
        assert_eq!(values.with_values().count(), 0);
        assert_eq!(values.names().collect::<Vec<_>>(), vec!["dry-run", "force"]);
    }

    #[test]
    fn set_updates_only_that_slot() {
        let mut values = store(&["force", "target"]);
        values.set("target", "/tmp").expect("set");

        assert_eq!(values.get("target"), Some("/tmp"));
        assert_eq!(values.get("force"), None);
        assert_eq!(values.with_values().collect::<Vec<_>>(), vec![("target", "/tmp")]);
    }

    #[test]
    fn unregistered_set_is_an_error() {
        let mut values = store(&["force"]);
        let err = values.set("verbose", "true").unwrap_err();

        assert_eq!(err, OptionError::Unknown("verbose".into()));
        assert_eq!(err.to_string(), "Unknown option 'verbose'");
        assert!(!values.is_registered("verbose"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn reregister_keeps_value() {
        let mut values = store(&["force"]);
        values.set("force", "true").expect("set");
        values.register("force");
        assert_eq!(values.get("force"), Some("true"));
    }
}
