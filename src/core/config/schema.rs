//! core::config::schema
//!
//! Settings file schema.
//!
//! # Validation
//!
//! Values are validated after parsing (e.g., the output width must be
//! positive).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Default column width for the output sink.
pub const DEFAULT_WIDTH: usize = 80;

/// Settings file contents.
///
/// # Example
///
/// ```toml
/// debug = false
/// quiet = false
/// data_dir = "/var/lib/yard"
///
/// [output]
/// width = 100
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    /// Emit `[debug]` diagnostics on stderr
    pub debug: Option<bool>,

    /// Suppress warnings
    pub quiet: Option<bool>,

    /// Secondary data directory exposed to commands
    pub data_dir: Option<PathBuf>,

    /// Output sink settings
    pub output: Option<OutputSettings>,
}

impl SettingsFile {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(output) = &self.output {
            output.validate()?;
        }
        Ok(())
    }
}

/// Output sink settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Column width used for wrapping and listings
    pub width: Option<usize>,
}

impl OutputSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == Some(0) {
            return Err(ConfigError::InvalidValue(
                "output.width must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
