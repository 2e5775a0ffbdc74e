//! cookies::file_store
//!
//! Flat-file cookie storage.
//!
//! # Format
//!
//! One hidden TOML file per installation, one table per section:
//!
//! ```toml
//! [cleanup]
//! v1_0_0 = "true"
//!
//! [prefs]
//! theme = "dark"
//! ```
//!
//! All writes are atomic (write to temp file, then rename). The file is
//! re-read on every access so separate processes see each other's writes.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::traits::{CookieError, CookieStore};

type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// File-backed cookie storage.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    /// Path to the cookie file
    path: PathBuf,
}

impl FileCookieStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the cookie file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_sections(&self) -> Result<Sections, CookieError> {
        if !self.path.exists() {
            return Ok(Sections::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| CookieError::ReadError(format!("cannot read cookie file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| CookieError::ReadError(format!("cannot parse cookie file: {}", e)))
    }

    fn write_sections(&self, sections: &Sections) -> Result<(), CookieError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CookieError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(sections)
            .map_err(|e| CookieError::WriteError(format!("cannot serialize cookies: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| CookieError::WriteError(format!("cannot create temp file: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| CookieError::WriteError(format!("cannot write cookies: {}", e)))?;

            file.sync_all()
                .map_err(|e| CookieError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| CookieError::WriteError(format!("cannot rename temp file: {}", e)))?;

        Ok(())
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, section: &str, name: &str) -> Result<Option<String>, CookieError> {
        let sections = self.read_sections()?;
        Ok(sections.get(section).and_then(|s| s.get(name)).cloned())
    }

    fn set(&self, section: &str, name: &str, value: &str) -> Result<(), CookieError> {
        let mut sections = self.read_sections()?;
        sections
            .entry(section.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self.write_sections(&sections)
    }

    fn delete(&self, section: &str, name: &str) -> Result<(), CookieError> {
        let mut sections = self.read_sections()?;
        let Some(entries) = sections.get_mut(section) else {
            return Ok(());
        };
        if entries.remove(name).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            sections.remove(section);
        }
        self.write_sections(&sections)
    }
}
