//! command
//!
//! Command nodes: named, described, invocable units.
//!
//! # Architecture
//!
//! A [`CommandNode`] wraps a [`Callable`] together with everything the
//! registry and dispatch engine need to know about it: its name, aliases,
//! declared options, one level of subcommands, a usage string and whether it
//! is the application default. Nodes are built once at start-up and handed to
//! the registry, which owns them for the rest of the process.
//!
//! # Invariants
//!
//! - A node's name never changes after construction
//! - The option name set is fixed at registration; values are filled into a
//!   per-invocation copy by the dispatch engine
//!
//! # Example
//!
//! ```
//! use switchyard::command::{CallContext, CommandNode, Params};
//!
//! let install = CommandNode::new(
//!     "install",
//!     "Install a package",
//!     Params::new().required("path"),
//!     |ctx: &mut CallContext<'_>, args: &[String]| {
//!         ctx.output.line(format!("installing {}", args[0]));
//!         Ok(())
//!     },
//! )
//! .with_alias("i")
//! .with_option("force");
//!
//! assert_eq!(install.usage(), "install <path>");
//! assert_eq!(install.required_arity(), 1);
//! ```

mod callable;
mod errors;
mod options;

pub use callable::{CallContext, Callable, FnCallable, Method, MethodCallable, Param, Params};
pub use errors::{CommandError, CommandResult};
pub use options::{OptionError, OptionValues};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A named, invocable unit with optional aliases, options and subcommands.
pub struct CommandNode {
    name: String,
    description: String,
    usage: Option<String>,
    callable: Box<dyn Callable>,
    aliases: Vec<String>,
    options: OptionValues,
    subcommands: BTreeMap<String, CommandNode>,
    application_default: bool,
}

impl CommandNode {
    /// Create a node whose body is a closure or `fn` item.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Params,
        body: F,
    ) -> Self
    where
        F: Fn(&mut CallContext<'_>, &[String]) -> CommandResult + 'static,
    {
        Self::from_callable(name, description, FnCallable::new(params, body))
    }

    /// Create a node whose body is a method bound to `receiver`.
    pub fn bound<T: 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Params,
        receiver: Rc<T>,
        method: Method<T>,
    ) -> Self {
        Self::from_callable(
            name,
            description,
            MethodCallable::new(params, receiver, method),
        )
    }

    /// Create a node from any [`Callable`].
    pub fn from_callable(
        name: impl Into<String>,
        description: impl Into<String>,
        callable: impl Callable + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage: None,
            callable: Box::new(callable),
            aliases: Vec::new(),
            options: OptionValues::new(),
            subcommands: BTreeMap::new(),
            application_default: false,
        }
    }

    // =========================================================================
    // Builders (start-up only)
    // =========================================================================

    /// Add an alternate name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.add_alias(alias);
        self
    }

    /// Register an option name.
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.register(option);
        self
    }

    /// Attach a subcommand, replacing any with the same name.
    pub fn with_subcommand(mut self, subcommand: CommandNode) -> Self {
        self.add_subcommand(subcommand);
        self
    }

    /// Set an explicit usage string instead of the derived one.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Mark this node as the application default.
    pub fn as_application_default(mut self) -> Self {
        self.application_default = true;
        self
    }

    pub(crate) fn add_alias(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
    }

    pub(crate) fn add_subcommand(&mut self, subcommand: CommandNode) {
        self.subcommands.insert(subcommand.name.clone(), subcommand);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Usage string: the explicit one if set, else `<name> <params>`.
    pub fn usage(&self) -> String {
        match &self.usage {
            Some(usage) if !usage.is_empty() => usage.clone(),
            _ => {
                let params = self.callable.params().usage();
                if params.is_empty() {
                    self.name.clone()
                } else {
                    format!("{} {}", self.name, params)
                }
            }
        }
    }

    /// Alternate names, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Declared option slots (all unset).
    pub fn options(&self) -> &OptionValues {
        &self.options
    }

    /// Look up a direct subcommand by name.
    pub fn subcommand(&self, name: &str) -> Option<&CommandNode> {
        self.subcommands.get(name)
    }

    /// Direct subcommands, sorted by name.
    pub fn subcommands(&self) -> impl Iterator<Item = &CommandNode> {
        self.subcommands.values()
    }

    /// Whether the node has any subcommands.
    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Whether the node is flagged as the application default.
    pub fn is_application_default(&self) -> bool {
        self.application_default
    }

    /// The wrapped callable.
    pub fn callable(&self) -> &dyn Callable {
        self.callable.as_ref()
    }

    /// Required positional arity of the callable.
    pub fn required_arity(&self) -> usize {
        self.callable.required_arity()
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("options", &self.options)
            .field("subcommands", &self.subcommands.keys().collect::<Vec<_>>())
            .field("application_default", &self.application_default)
            .finish_non_exhaustive()
    }
}
