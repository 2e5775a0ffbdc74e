//! cookies::memory_store
//!
//! In-process cookie storage. Nothing survives the process; used for
//! tests and for hosts that opt out of persistence.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::traits::{CookieError, CookieStore};

/// Cookie store held in memory.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    values: RefCell<BTreeMap<(String, String), String>>,
}

impl MemoryCookieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, section: &str, name: &str) -> Result<Option<String>, CookieError> {
        Ok(self
            .values
            .borrow()
            .get(&(section.to_string(), name.to_string()))
            .cloned())
    }

    fn set(&self, section: &str, name: &str, value: &str) -> Result<(), CookieError> {
        self.values
            .borrow_mut()
            .insert((section.to_string(), name.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, section: &str, name: &str) -> Result<(), CookieError> {
        self.values
            .borrow_mut()
            .remove(&(section.to_string(), name.to_string()));
        Ok(())
    }
}
