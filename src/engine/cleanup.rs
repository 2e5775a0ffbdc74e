//! engine::cleanup
//!
//! Version-tagged, run-once cleanup actions.
//!
//! # Architecture
//!
//! A host registers actions tagged with the version that introduced them.
//! On start-up the application calls [`CleanupActions::run`] with its own
//! version. The pass is guarded by the cookie `cleanup` / `v<version>` (dots
//! become underscores, so `1.0.0` is `v1_0_0`):
//!
//! ```text
//! flag set? -> skip
//!           -> run actions with tag <= current, in order
//!           -> delete returned paths that exist
//!           -> set flag
//! ```
//!
//! # Invariants
//!
//! - The flag is written only after every qualifying action succeeded
//! - An action error stops the pass and leaves the flag unset
//! - Relative paths returned by an action are resolved against the root

use std::fmt;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::cookies::CookieStore;
use crate::core::fs::{delete_path, Directory};
use crate::core::version::{Version, VersionError};
use crate::ui::output::{debug, Verbosity};

/// Cookie section holding the per-version done flags.
pub const CLEANUP_SECTION: &str = "cleanup";

/// Value stored once a version's pass has completed.
const DONE: &str = "true";

/// A cleanup body: receives the application root, returns paths to delete.
pub type CleanupFn = Box<dyn Fn(&Directory) -> anyhow::Result<Vec<PathBuf>>>;

struct CleanupAction {
    version: Version,
    action: CleanupFn,
}

/// What a cleanup pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// The pass had already run for this version.
    pub skipped: bool,
    /// Tags of the actions that ran, in order.
    pub ran: Vec<String>,
    /// Paths that existed and were removed.
    pub deleted: Vec<PathBuf>,
}

/// Registered cleanup actions, in registration order.
#[derive(Default)]
pub struct CleanupActions {
    actions: Vec<CleanupAction>,
}

impl CleanupActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under `version`.
    ///
    /// Registering the same version again replaces the earlier action and
    /// keeps its position.
    pub fn register<F>(&mut self, version: &str, action: F) -> Result<(), VersionError>
    where
        F: Fn(&Directory) -> anyhow::Result<Vec<PathBuf>> + 'static,
    {
        let version = Version::parse(version)?;
        let action: CleanupFn = Box::new(action);

        match self
            .actions
            .iter_mut()
            .find(|a| a.version.as_str() == version.as_str())
        {
            Some(existing) => existing.action = action,
            None => self.actions.push(CleanupAction { version, action }),
        }
        Ok(())
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run the pass for `current` unless it already completed.
    pub fn run(
        &self,
        current: &Version,
        root: &Directory,
        cookies: &dyn CookieStore,
        verbosity: Verbosity,
    ) -> anyhow::Result<CleanupReport> {
        let flag = current.slug();
        if cookies.get(CLEANUP_SECTION, &flag)?.as_deref() == Some(DONE) {
            debug(format!("cleanup for {} already done", current), verbosity);
            return Ok(CleanupReport {
                skipped: true,
                ..CleanupReport::default()
            });
        }

        let mut report = CleanupReport::default();
        for entry in self.actions.iter().filter(|a| a.version <= *current) {
            debug(format!("running cleanup action {}", entry.version), verbosity);
            let paths = (entry.action)(root)
                .with_context(|| format!("cleanup action {} failed", entry.version))?;

            for path in paths {
                let path = if path.is_relative() {
                    root.child(&path)
                } else {
                    path
                };
                if delete_path(&path)
                    .with_context(|| format!("failed to delete '{}'", path.display()))?
                {
                    debug(format!("deleted {}", path.display()), verbosity);
                    report.deleted.push(path);
                }
            }
            report.ran.push(entry.version.to_string());
        }

        cookies.set(CLEANUP_SECTION, &flag, DONE)?;
        Ok(report)
    }
}

impl fmt::Debug for CleanupActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.actions.iter().map(|a| a.version.as_str()))
            .finish()
    }
}
