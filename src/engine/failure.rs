//! engine::failure
//!
//! Failure taxonomy for dispatch and the classifier that turns each failure
//! into a rendered message and an exit status.
//!
//! # Architecture
//!
//! Dispatch never prints and never exits. It returns a [`DispatchError`],
//! and [`classify`] is the single exhaustive switch deciding what the user
//! sees:
//!
//! | Failure | Rendering | Exit |
//! |---|---|---|
//! | `UnknownCommand` | `<app>: '<name>' is not a <app> command. See '<app> help'` | 1 |
//! | `NoCommandSpecified` | full usage text | 1 |
//! | `WrongArgumentCount` | `usage: <app> <usage>` | 1 |
//! | `UnknownOption` | `<app>: Unknown option '<key>' for command '<command>'` | 1 |
//! | `CommandError::Failed` | `<app>: <message>` | carried code |
//! | `CommandError::Usage` | `usage: <app> <message>` | 1 |
//!
//! `CommandError::Internal` is outside the taxonomy: `classify` hands it back
//! as a fatal error instead of a verdict.

use thiserror::Error;

use crate::command::CommandError;

/// Exit status for every classified resolution failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Why a dispatch did not complete.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command name matched neither a command nor an alias.
    #[error("'{name}' is not a command")]
    UnknownCommand { name: String },

    /// No command, no executable option and no default.
    #[error("no command specified")]
    NoCommandSpecified,

    /// Fewer positional arguments than the target requires.
    #[error("'{command}' expects {expected} argument(s), got {given}")]
    WrongArgumentCount {
        command: String,
        usage: String,
        expected: usize,
        given: usize,
    },

    /// An option the target never registered.
    #[error("Unknown option '{key}' for command '{command}'")]
    UnknownOption { key: String, command: String },

    /// Raised by the invoked command itself.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// How a verdict's message is written to the output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// A single line.
    Line(String),
    /// Pre-formatted text, already newline-terminated.
    Block(String),
}

impl Rendering {
    /// The rendered text without regard to layout.
    pub fn text(&self) -> &str {
        match self {
            Rendering::Line(text) | Rendering::Block(text) => text,
        }
    }
}

/// What the application prints and the status it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub rendering: Rendering,
    pub exit_code: i32,
}

impl Verdict {
    fn line(text: String, exit_code: i32) -> Self {
        Self {
            rendering: Rendering::Line(text),
            exit_code,
        }
    }
}

/// Classify a dispatch failure for application `app`.
///
/// `full_usage` is only called for `NoCommandSpecified`.
///
/// # Errors
///
/// Returns the wrapped error when the command failed with
/// [`CommandError::Internal`].
pub fn classify<F>(app: &str, err: DispatchError, full_usage: F) -> anyhow::Result<Verdict>
where
    F: FnOnce() -> String,
{
    let verdict = match err {
        DispatchError::UnknownCommand { name } => Verdict::line(
            format!(
                "{app}: '{name}' is not a {app} command. See '{app} help'",
                app = app,
                name = name
            ),
            FAILURE_EXIT_CODE,
        ),
        DispatchError::NoCommandSpecified => Verdict {
            rendering: Rendering::Block(full_usage()),
            exit_code: FAILURE_EXIT_CODE,
        },
        DispatchError::WrongArgumentCount { usage, .. } => {
            Verdict::line(format!("usage: {} {}", app, usage), FAILURE_EXIT_CODE)
        }
        DispatchError::UnknownOption { key, command } => Verdict::line(
            format!("{}: Unknown option '{}' for command '{}'", app, key, command),
            FAILURE_EXIT_CODE,
        ),
        DispatchError::Command(CommandError::Failed { message, code }) => {
            Verdict::line(format!("{}: {}", app, message), code)
        }
        DispatchError::Command(CommandError::Usage(message)) => {
            Verdict::line(format!("usage: {} {}", app, message), FAILURE_EXIT_CODE)
        }
        DispatchError::Command(CommandError::Internal(err)) => return Err(err),
    };
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn verdict(err: DispatchError) -> Verdict {
        classify("yard", err, || "usage: yard <command> [<args>]\n".to_string())
            .expect("classified")
    }

    #[test]
    fn unknown_command() {
        let v = verdict(DispatchError::UnknownCommand {
            name: "frobnicate".into(),
        });
        assert_eq!(
            v.rendering,
            Rendering::Line("yard: 'frobnicate' is not a yard command. See 'yard help'".into())
        );
        assert_eq!(v.exit_code, 1);
    }

    #[test]
    fn no_command_shows_full_usage() {
        let v = verdict(DispatchError::NoCommandSpecified);
        assert_eq!(
            v.rendering,
            Rendering::Block("usage: yard <command> [<args>]\n".into())
        );
        assert_eq!(v.exit_code, 1);
    }

    #[test]
    fn full_usage_only_built_when_needed() {
        let v = classify("yard", DispatchError::UnknownCommand { name: "x".into() }, || {
            panic!("usage should not be rendered")
        })
        .expect("classified");
        assert_eq!(v.exit_code, 1);
    }

    #[test]
    fn wrong_argument_count() {
        let v = verdict(DispatchError::WrongArgumentCount {
            command: "install".into(),
            usage: "install <path>".into(),
            expected: 1,
            given: 0,
        });
        assert_eq!(v.rendering.text(), "usage: yard install <path>");
        assert_eq!(v.exit_code, 1);
    }

    #[test]
    fn unknown_option() {
        let v = verdict(DispatchError::UnknownOption {
            key: "loud".into(),
            command: "echo".into(),
        });
        assert_eq!(
            v.rendering.text(),
            "yard: Unknown option 'loud' for command 'echo'"
        );
    }

    #[test]
    fn application_error_keeps_code() {
        let v = verdict(CommandError::failed("disk full", 7).into());
        assert_eq!(v.rendering.text(), "yard: disk full");
        assert_eq!(v.exit_code, 7);
    }

    #[test]
    fn application_usage_error() {
        let v = verdict(CommandError::usage("cookie get <section> <name>").into());
        assert_eq!(v.rendering.text(), "usage: yard cookie get <section> <name>");
        assert_eq!(v.exit_code, 1);
    }

    #[test]
    fn internal_error_is_not_classified() {
        let err = classify(
            "yard",
            CommandError::Internal(anyhow!("index out of range")).into(),
            String::new,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "index out of range");
    }
}
