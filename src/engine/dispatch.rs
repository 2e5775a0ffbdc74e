//! engine::dispatch
//!
//! Resolution and dispatch: the single path from an [`Invocation`] to one
//! invoked callable.
//!
//! # Procedure
//!
//! ```text
//! Executable option? -> Command? -> Default? -> Descend -> Arity -> Options -> Inject -> Invoke
//! ```
//!
//! 1. The first executable-option flag, if registered, is the target. It is
//!    told the plain command name from the same line. Whenever a flag is
//!    present, command resolution is skipped: an unregistered first flag
//!    falls through to the default node.
//! 2. Otherwise a command name resolves through the registry.
//! 3. Otherwise the default node runs, or dispatch fails with
//!    `NoCommandSpecified`. The default receives the invocation's
//!    positional arguments.
//! 4. When the first positional argument names a subcommand of the target,
//!    the target becomes that subcommand and the argument is consumed. This
//!    happens at most once.
//! 5. Fewer positional arguments than the target requires is
//!    `WrongArgumentCount`. Surplus arguments pass through.
//! 6. Every command option is set on a per-invocation copy of the target's
//!    option slots; an unregistered name is `UnknownOption`.
//! 7. The callable receives the output sink, the mirror and the cookie store.
//! 8. The callable runs; its error is returned unchanged.
//!
//! # Invariants
//!
//! - A callable is never invoked with fewer arguments than it requires
//! - The registry is only read; option values live in a clone

use super::failure::DispatchError;
use super::invocation::Invocation;
use super::mirror::Mirror;
use super::registry::{Registry, RegistryError};
use crate::command::{CallContext, CommandNode, OptionError};
use crate::cookies::CookieStore;
use crate::ui::output::{debug, Output, Verbosity};

/// How the target was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A registered executable-option flag.
    ExecutableOption,
    /// A command name or alias.
    Command,
    /// The application default.
    Default,
}

/// The outcome of steps 1 to 5: a target and the arguments it will get.
#[derive(Debug)]
pub struct Resolved<'r> {
    /// The node that will be invoked.
    pub node: &'r CommandNode,
    /// The node descended from, when a subcommand was selected.
    pub parent: Option<&'r CommandNode>,
    pub origin: Origin,
    /// Plain command name typed on the line, if any.
    pub command_name: Option<String>,
    /// Positional arguments after subcommand descent.
    pub args: Vec<String>,
}

impl Resolved<'_> {
    /// Usage string of the target, prefixed by the parent after descent.
    pub fn usage(&self) -> String {
        match self.parent {
            Some(parent) => format!("{} {}", parent.name(), self.node.usage()),
            None => self.node.usage(),
        }
    }

    /// Display name of the target: `install` or `install force`.
    pub fn display_name(&self) -> String {
        match self.parent {
            Some(parent) => format!("{} {}", parent.name(), self.node.name()),
            None => self.node.name().to_string(),
        }
    }
}

/// Resolves invocations against a frozen registry and runs the target.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    verbosity: Verbosity,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry, verbosity: Verbosity) -> Self {
        Self {
            registry,
            verbosity,
        }
    }

    /// Steps 1 to 4: choose the target node and its positional arguments.
    pub fn resolve(&self, invocation: &Invocation) -> Result<Resolved<'r>, DispatchError> {
        let command_name = invocation.command().map(str::to_string);

        let (node, origin) = if let Some(flag) = invocation.first_flag() {
            match self.registry.lookup_executable_option(flag) {
                Some(node) => {
                    debug(
                        format!("executable option '{}' takes precedence", node.name()),
                        self.verbosity,
                    );
                    (node, Origin::ExecutableOption)
                }
                None => {
                    debug(
                        format!("unregistered flag '--{}', skipping command lookup", flag),
                        self.verbosity,
                    );
                    (self.default_node()?, Origin::Default)
                }
            }
        } else if let Some(name) = invocation.command() {
            let node = self.registry.lookup(name).map_err(|err| match err {
                RegistryError::UnknownCommand(name)
                | RegistryError::UnknownExecutableOption(name) => {
                    DispatchError::UnknownCommand { name }
                }
            })?;
            debug(format!("'{}' resolved to '{}'", name, node.name()), self.verbosity);
            (node, Origin::Command)
        } else {
            (self.default_node()?, Origin::Default)
        };

        Ok(self.descend(Resolved {
            node,
            parent: None,
            origin,
            command_name,
            args: invocation.args().to_vec(),
        }))
    }

    fn default_node(&self) -> Result<&'r CommandNode, DispatchError> {
        let node = self
            .registry
            .default_node()
            .ok_or(DispatchError::NoCommandSpecified)?;
        debug(format!("running default '{}'", node.name()), self.verbosity);
        Ok(node)
    }

    fn descend(&self, mut resolved: Resolved<'r>) -> Resolved<'r> {
        let sub = resolved
            .args
            .first()
            .and_then(|first| resolved.node.subcommand(first));

        if let Some(sub) = sub {
            debug(
                format!("descending into '{} {}'", resolved.node.name(), sub.name()),
                self.verbosity,
            );
            resolved.args.remove(0);
            resolved.parent = Some(resolved.node);
            resolved.node = sub;
        }
        resolved
    }

    /// Run the full procedure for one invocation.
    ///
    /// `mirror` must be built from the registry immediately beforehand.
    pub fn dispatch(
        &self,
        invocation: &Invocation,
        output: &mut Output,
        mirror: &Mirror,
        cookies: &dyn CookieStore,
    ) -> Result<Origin, DispatchError> {
        let resolved = self.resolve(invocation)?;

        let expected = resolved.node.required_arity();
        let given = resolved.args.len();
        if given < expected {
            debug(
                format!(
                    "'{}' requires {} argument(s), got {}",
                    resolved.display_name(),
                    expected,
                    given
                ),
                self.verbosity,
            );
            return Err(DispatchError::WrongArgumentCount {
                command: resolved.display_name(),
                usage: resolved.usage(),
                expected,
                given,
            });
        }

        let mut options = resolved.node.options().clone();
        for (key, value) in invocation.options() {
            options.set(key, value.as_str()).map_err(|err| match err {
                OptionError::Unknown(key) => DispatchError::UnknownOption {
                    key,
                    command: match (resolved.origin, &resolved.command_name) {
                        (Origin::Command, Some(typed)) => typed.clone(),
                        _ => resolved.node.name().to_string(),
                    },
                },
            })?;
        }

        let told = match resolved.origin {
            Origin::ExecutableOption => resolved.command_name.as_deref(),
            Origin::Command | Origin::Default => None,
        };

        debug(
            format!(
                "invoking '{}' with {} argument(s)",
                resolved.display_name(),
                given
            ),
            self.verbosity,
        );
        let mut ctx = CallContext::new(output, mirror, cookies, &options, told);
        resolved.node.callable().invoke(&mut ctx, &resolved.args)?;

        Ok(resolved.origin)
    }
}
