//! cookies
//!
//! Persistent key/value storage ("cookies") for application state that must
//! survive between invocations, such as the cleanup-done flags.
//!
//! # Architecture
//!
//! Cookies are stored through the [`CookieStore`] trait, which has two
//! implementations:
//!
//! - [`FileCookieStore`]: Stores in `<root>/.cookies` (default)
//! - [`MemoryCookieStore`]: Process-local, nothing persisted
//!
//! # Concurrency
//!
//! No locking is performed. Two processes writing the same file race and the
//! last writer wins.
//!
//! # Example
//!
//! ```ignore
//! use switchyard::cookies::create_store;
//!
//! let store = create_store("file", &paths)?;
//! store.set("prefs", "theme", "dark")?;
//! ```

mod file_store;
mod memory_store;
mod traits;

pub use file_store::FileCookieStore;
pub use memory_store::MemoryCookieStore;
pub use traits::{CookieError, CookieStore};

use crate::core::paths::AppPaths;

/// The default cookie store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a cookie store based on the provider name.
///
/// # Providers
///
/// - `"file"` (default): [`FileCookieStore`] at `<root>/.cookies`
/// - `"memory"`: [`MemoryCookieStore`]
pub fn create_store(provider: &str, paths: &AppPaths) -> Result<Box<dyn CookieStore>, CookieError> {
    match provider {
        "file" => Ok(Box::new(FileCookieStore::new(paths.cookies_path()))),
        "memory" => Ok(Box::new(MemoryCookieStore::new())),
        other => Err(CookieError::ProviderNotAvailable(format!(
            "unknown cookie provider: '{}' (valid: file, memory)",
            other
        ))),
    }
}
