//! cookies::traits
//!
//! Cookie storage trait definition.
//!
//! # Design
//!
//! Cookies are small persisted strings addressed by a `(section, name)` pair,
//! such as `("cleanup", "v1_0_0")`. Every `set` and `delete` writes through
//! immediately; there is no batching and no locking between processes (last
//! writer wins).

use thiserror::Error;

/// Errors from cookie storage operations.
#[derive(Debug, Error)]
pub enum CookieError {
    /// Failed to read the backing store.
    #[error("failed to read cookies: {0}")]
    ReadError(String),

    /// Failed to write the backing store.
    #[error("failed to write cookies: {0}")]
    WriteError(String),

    /// Provider not available or not configured.
    #[error("cookie provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for persistent key/value stores.
///
/// # Example
///
/// ```ignore
/// use switchyard::cookies::{CookieStore, FileCookieStore};
///
/// let store = FileCookieStore::new("/opt/yard/.cookies");
/// store.set("cleanup", "v1_0_0", "true")?;
/// assert_eq!(store.get("cleanup", "v1_0_0")?.as_deref(), Some("true"));
/// store.delete("cleanup", "v1_0_0")?;
/// ```
pub trait CookieStore {
    /// Get a value.
    ///
    /// Returns `Ok(None)` when the section or name is unset.
    fn get(&self, section: &str, name: &str) -> Result<Option<String>, CookieError>;

    /// Set a value, overwriting any existing one, and persist immediately.
    fn set(&self, section: &str, name: &str, value: &str) -> Result<(), CookieError>;

    /// Delete a value and persist immediately.
    ///
    /// Returns `Ok(())` even if the value did not exist.
    fn delete(&self, section: &str, name: &str) -> Result<(), CookieError>;

    /// Check if a value exists.
    fn exists(&self, section: &str, name: &str) -> Result<bool, CookieError> {
        Ok(self.get(section, name)?.is_some())
    }
}
