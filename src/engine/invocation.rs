//! engine::invocation
//!
//! The parsed form of one command line.
//!
//! # Token Grammar
//!
//! ```text
//! yard [--exec-flag[=v]]... [command] [arg | --option[=v]]... [-- arg...]
//! ```
//!
//! - `--name[=value]` and `-n[=value]` are flags; without `=` the value is `"true"`
//! - Flags before the command name are executable-option flags
//! - Flags after the command name are command options
//! - The first non-flag token is the command name, the rest are positional
//! - `--` ends flag parsing; a lone `-` is an ordinary positional token
//!
//! # Invariants
//!
//! - Flag and option lists keep first-encountered order; repeating a key
//!   updates its value without moving it

/// Value given to a flag written without `=value`.
pub const PRESENT: &str = "true";

/// A tokenized command line, consumed once by dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    command: Option<String>,
    args: Vec<String>,
    options: Vec<(String, String)>,
    flags: Vec<(String, String)>,
}

impl Invocation {
    /// An empty invocation: no command, no arguments, no flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize process arguments (without the program name).
    pub fn parse<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut invocation = Invocation::new();
        let mut flags_done = false;

        for token in argv {
            let token = token.into();

            if !flags_done && token == "--" {
                flags_done = true;
                continue;
            }

            match split_flag(&token).filter(|_| !flags_done) {
                Some((name, value)) if invocation.command.is_none() => {
                    upsert(&mut invocation.flags, name, value);
                }
                Some((name, value)) => {
                    upsert(&mut invocation.options, name, value);
                }
                None if invocation.command.is_none() => invocation.command = Some(token),
                None => invocation.args.push(token),
            }
        }

        invocation
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Set the command name.
    pub fn with_command(mut self, name: impl Into<String>) -> Self {
        self.command = Some(name.into());
        self
    }

    /// Append one positional argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append positional arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a command option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.options, key.into(), value.into());
        self
    }

    /// Add an executable-option flag.
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.flags, name.into(), value.into());
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The command name, if one was given.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Positional arguments in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Command options in first-encountered order.
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Executable-option flags in first-encountered order.
    pub fn flags(&self) -> &[(String, String)] {
        &self.flags
    }

    /// The executable-option candidate: the first flag encountered.
    pub fn first_flag(&self) -> Option<&str> {
        self.flags.first().map(|(name, _)| name.as_str())
    }
}

/// Split `--name[=value]` / `-n[=value]` into its parts.
fn split_flag(token: &str) -> Option<(String, String)> {
    let body = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, value),
        None => (body, PRESENT),
    };

    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

fn upsert(list: &mut Vec<(String, String)>, key: String, value: String) {
    match list.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => list.push((key, value)),
    }
}
