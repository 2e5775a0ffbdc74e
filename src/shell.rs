//! shell
//!
//! Run an external shell command and capture what it printed.
//!
//! The command runs through `sh -c` with stderr merged into stdout. The raw
//! capture is trimmed; the optional formatted capture prefixes every line and
//! colours it green when the command succeeded, red when it failed.
//!
//! # Example
//!
//! ```no_run
//! use switchyard::shell;
//!
//! let result = shell::exec("git --version", true, "> ").unwrap();
//! if result.success() {
//!     print!("{}", result.formatted.unwrap_or_default());
//! }
//! ```

use std::process::Command;

use colored::Colorize;
use thiserror::Error;

/// Prefix used by hosts that have no preference.
pub const DEFAULT_PREFIX: &str = "> ";

/// Errors from running a shell command.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

/// What a shell command printed and how it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    /// The command as given, without the stderr redirect.
    pub command: String,
    /// Combined stdout and stderr, trimmed.
    pub raw: String,
    /// Prefixed, coloured lines, when requested.
    pub formatted: Option<String>,
    /// Exit status; `-1` when the process was killed by a signal.
    pub exit_code: i32,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `command` with `sh -c`, merging stderr into stdout.
pub fn exec(command: &str, formatted: bool, prefix: &str) -> Result<ShellOutput, ShellError> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(format!("{} 2>&1", command))
        .output()
        .map_err(|source| ShellError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let exit_code = output.status.code().unwrap_or(-1);
    let captured = String::from_utf8_lossy(&output.stdout);

    let formatted = formatted.then(|| {
        captured
            .lines()
            .map(|line| {
                let text = format!("{}{}", prefix, line);
                let text = if exit_code == 0 { text.green() } else { text.red() };
                format!("{}\n", text)
            })
            .collect::<String>()
    });

    Ok(ShellOutput {
        command: command.to_string(),
        raw: captured.trim().to_string(),
        formatted,
        exit_code,
    })
}
