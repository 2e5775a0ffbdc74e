//! core::paths
//!
//! Centralized path routing for application storage locations.
//!
//! # Storage Layout
//!
//! All application data lives under the application root directory:
//! - `.cookies` - Persistent key/value store (hidden, one per installation)
//! - `config.toml` - Optional settings file
//!
//! A separate data directory may be configured; it is carried into the
//! context mirror but never created by the toolkit itself.
//!
//! # Example
//!
//! ```
//! use switchyard::core::paths::AppPaths;
//! use std::path::PathBuf;
//!
//! let paths = AppPaths::new("/opt/yard");
//! assert_eq!(paths.cookies_path(), PathBuf::from("/opt/yard/.cookies"));
//! assert_eq!(paths.config_path(), PathBuf::from("/opt/yard/config.toml"));
//! ```

use std::path::{Path, PathBuf};

use super::fs::Directory;

/// Name of the hidden cookie file under the application root.
pub const COOKIE_FILE: &str = ".cookies";

/// Name of the settings file under the application root.
pub const CONFIG_FILE: &str = "config.toml";

/// Path routing for one application installation.
///
/// # Invariants
///
/// - No code outside this module joins storage file names onto the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: Directory,
}

impl AppPaths {
    /// Create path routing for the given application root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Directory::new(root),
        }
    }

    /// The application root directory.
    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Root as a plain path.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the cookie store: `<root>/.cookies`.
    pub fn cookies_path(&self) -> PathBuf {
        self.root.child(COOKIE_FILE)
    }

    /// Path to the settings file: `<root>/config.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.root.child(CONFIG_FILE)
    }

    /// Environment variable naming an alternate settings file.
    ///
    /// The application name is upper-cased and dashes become underscores,
    /// so `my-tool` reads `MY_TOOL_CONFIG`.
    pub fn config_env_var(app_name: &str) -> String {
        format!("{}_CONFIG", env_prefix(app_name))
    }

    /// Environment variable that turns on debug diagnostics.
    pub fn debug_env_var(app_name: &str) -> String {
        format!("{}_DEBUG", env_prefix(app_name))
    }
}

fn env_prefix(app_name: &str) -> String {
    app_name.to_uppercase().replace('-', "_")
}
