//! core::config
//!
//! Settings schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Settings file
//! 3. Environment (`<APP>_DEBUG`, `COLUMNS`)
//!
//! # Settings File Locations
//!
//! Searched in order:
//! 1. `$<APP>_CONFIG` if set
//! 2. `<root>/config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use switchyard::core::config::Settings;
//! use switchyard::core::paths::AppPaths;
//!
//! let result = Settings::load("yard", &AppPaths::new("/opt/yard")).unwrap();
//! println!("width: {}", result.settings.width());
//! ```

pub mod schema;

pub use schema::{OutputSettings, SettingsFile, DEFAULT_WIDTH};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::AppPaths;
use crate::ui::output::Verbosity;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
}

/// Result of loading settings.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The resolved settings.
    pub settings: Settings,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    debug: bool,
    quiet: bool,
    width: usize,
    data_dir: Option<PathBuf>,
    source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            width: DEFAULT_WIDTH,
            data_dir: None,
            source: None,
        }
    }
}

impl Settings {
    /// Load settings for `app_name` from the process environment and the
    /// standard file locations.
    pub fn load(app_name: &str, paths: &AppPaths) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_with_env(app_name, paths, |key| std::env::var(key).ok())
    }

    /// Load settings using `env` to look up environment variables.
    pub fn load_with_env<F>(
        app_name: &str,
        paths: &AppPaths,
        env: F,
    ) -> Result<ConfigLoadResult, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let candidate = env(&AppPaths::config_env_var(app_name))
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(|| Some(paths.config_path()).filter(|p| p.exists()));

        let file = match &candidate {
            Some(path) => Self::read_file(path)?,
            None => SettingsFile::default(),
        };
        file.validate()?;

        let mut settings = Settings {
            debug: file.debug.unwrap_or(false),
            quiet: file.quiet.unwrap_or(false),
            width: file
                .output
                .as_ref()
                .and_then(|o| o.width)
                .unwrap_or(DEFAULT_WIDTH),
            data_dir: file.data_dir,
            source: candidate,
        };

        if let Some(flag) = env(&AppPaths::debug_env_var(app_name)) {
            settings.debug = matches!(flag.trim(), "1" | "true" | "yes");
        }

        if let Some(columns) = env("COLUMNS") {
            match columns.trim().parse::<usize>() {
                Ok(width) if width > 0 => settings.width = width,
                _ => warnings.push(ConfigWarning {
                    message: format!("ignoring invalid COLUMNS value '{}'", columns),
                }),
            }
        }

        Ok(ConfigLoadResult { settings, warnings })
    }

    fn read_file(path: &Path) -> Result<SettingsFile, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Whether debug diagnostics are enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether warnings are suppressed.
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Output column width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Configured data directory, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// The file the settings were read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Diagnostic verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Override the debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the output width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Override the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_no_file() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path());

        let result = Settings::load_with_env("yard", &paths, env_from(&[])).expect("load");

        assert_eq!(result.settings, Settings::default());
        assert!(result.warnings.is_empty());
        assert_eq!(result.settings.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn reads_root_config_file() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path());
        fs::write(
            paths.config_path(),
            "debug = true\n[output]\nwidth = 60\n",
        )
        .expect("write config");

        let result = Settings::load_with_env("yard", &paths, env_from(&[])).expect("load");

        assert!(result.settings.debug());
        assert_eq!(result.settings.width(), 60);
        assert_eq!(result.settings.source(), Some(paths.config_path().as_path()));
        assert_eq!(result.settings.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn env_config_path_takes_precedence() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path());
        fs::write(paths.config_path(), "quiet = false\n").expect("write root config");

        let alt = temp.path().join("alt.toml");
        fs::write(&alt, "quiet = true\n").expect("write alt config");
        let alt_str = alt.to_string_lossy().to_string();

        let result = Settings::load_with_env(
            "yard",
            &paths,
            env_from(&[("YARD_CONFIG", alt_str.as_str())]),
        )
        .expect("load");

        assert!(result.settings.quiet());
        assert_eq!(result.settings.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path());
        fs::write(paths.config_path(), "[output]\nwidth = 60\n").expect("write config");

        let result = Settings::load_with_env(
            "yard",
            &paths,
            env_from(&[("YARD_DEBUG", "1"), ("COLUMNS", "132")]),
        )
        .expect("load");

        assert!(result.settings.debug());
        assert_eq!(result.settings.width(), 132);
    }

    #[test]
    fn invalid_columns_warns() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path());

        let result =
            Settings::load_with_env("yard", &paths, env_from(&[("COLUMNS", "wide")])).expect("load");

        assert_eq!(result.settings.width(), DEFAULT_WIDTH);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("COLUMNS"));
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path());
        fs::write(paths.config_path(), "debug = [unclosed").expect("write config");

        let err = Settings::load_with_env("yard", &paths, env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
