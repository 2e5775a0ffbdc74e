//! core::fs
//!
//! Directory and file handles used by the application and by cleanup
//! actions.
//!
//! Handles are plain path wrappers; nothing is touched on disk until one of
//! the query or mutation methods is called.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A handle to a directory that may or may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    /// Create a handle for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of this directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Resolve a child path (file or directory) under this directory.
    pub fn child(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Resolve a child directory handle.
    pub fn child_dir(&self, name: impl AsRef<Path>) -> Directory {
        Directory::new(self.child(name))
    }

    /// Create the directory and any missing parents.
    pub fn create(&self) -> io::Result<()> {
        fs::create_dir_all(&self.path)
    }

    /// Delete the directory and everything under it.
    ///
    /// Returns `Ok(false)` when it did not exist.
    pub fn delete(&self) -> io::Result<bool> {
        delete_path(&self.path)
    }
}

/// Delete a file or directory tree if it exists.
///
/// Returns `Ok(true)` when something was removed and `Ok(false)` when the
/// path did not exist.
pub fn delete_path(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).map(|_| true),
        Ok(_) => fs::remove_file(path).map(|_| true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn child_joins_path() {
        let dir = Directory::new("/app");
        assert_eq!(dir.child(".cookies"), PathBuf::from("/app/.cookies"));
        assert_eq!(dir.child_dir("data").path(), Path::new("/app/data"));
    }

    #[test]
    fn create_and_delete_directory() {
        let temp = TempDir::new().expect("create temp dir");
        let dir = Directory::new(temp.path().join("a").join("b"));

        assert!(!dir.exists());
        dir.create().expect("create");
        assert!(dir.exists());

        fs::write(dir.child("file.txt"), "x").expect("write");
        assert!(dir.delete().expect("delete"));
        assert!(!dir.exists());
    }

    #[test]
    fn delete_path_handles_files_and_missing() {
        let temp = TempDir::new().expect("create temp dir");
        let file = temp.path().join("old.log");
        fs::write(&file, "stale").expect("write");

        assert!(delete_path(&file).expect("delete file"));
        assert!(!file.exists());
        assert!(!delete_path(&file).expect("delete missing"));
    }
}
