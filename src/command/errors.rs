//! command::errors
//!
//! Errors a command body can raise.

use thiserror::Error;

/// Error returned by a command's callable.
///
/// `Failed` and `Usage` are rendered by the application and turned into an
/// exit status. `Internal` is not part of the user-facing taxonomy: it
/// escapes the dispatch boundary as a fatal error.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command failed; print `<app>: <message>` and exit with `code`.
    #[error("{message}")]
    Failed { message: String, code: i32 },

    /// The command was used incorrectly; print `usage: <app> <message>`.
    #[error("{0}")]
    Usage(String),

    /// A defect or unexpected failure inside the command.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CommandError {
    /// Fail with a message and exit code.
    pub fn failed(message: impl Into<String>, code: i32) -> Self {
        CommandError::Failed {
            message: message.into(),
            code,
        }
    }

    /// Ask the application to show a usage line.
    pub fn usage(message: impl Into<String>) -> Self {
        CommandError::Usage(message.into())
    }
}

/// Result type returned by command callables.
pub type CommandResult = Result<(), CommandError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn constructors() {
        match CommandError::failed("disk full", 3) {
            CommandError::Failed { message, code } => {
                assert_eq!(message, "disk full");
                assert_eq!(code, 3);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(CommandError::usage("x <y>"), CommandError::Usage(m) if m == "x <y>"));
    }

    #[test]
    fn internal_from_anyhow() {
        let err: CommandError = anyhow!("boom").into();
        assert!(matches!(err, CommandError::Internal(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
