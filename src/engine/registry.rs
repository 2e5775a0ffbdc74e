//! engine::registry
//!
//! The command registry: top-level commands, their alias index, executable
//! options and the application default.
//!
//! # Namespaces
//!
//! Commands and executable options live in disjoint namespaces, each with its
//! own alias index. Within a namespace, names and aliases share one lookup
//! space with these rules:
//!
//! - An exact name always wins over an alias spelled the same way
//! - When two nodes declare the same alias, the later registration wins
//! - An alias whose command has been unregistered resolves to nothing
//! - Re-registering a name replaces the node together with its aliases and
//!   default status
//!
//! # Default
//!
//! At most one node is the application default. Registering a node flagged
//! as default (command or executable option) replaces the previous default.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::command::CommandNode;

/// Names excluded from command listings because they list the others.
pub const LISTING_COMMANDS: [&str; 2] = ["help", "list"];

/// Whether `name` is one of the self-referential listing commands.
pub fn is_listing_command(name: &str) -> bool {
    LISTING_COMMANDS.contains(&name)
}

/// Errors from registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown executable option '{0}'")]
    UnknownExecutableOption(String),
}

/// Which namespace the default node lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DefaultTarget {
    Command(String),
    ExecutableOption(String),
}

/// Registered commands and executable options.
#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<String, CommandNode>,
    aliases: HashMap<String, String>,
    executable_options: BTreeMap<String, CommandNode>,
    option_aliases: HashMap<String, String>,
    default: Option<DefaultTarget>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a command, replacing any command with the same name.
    ///
    /// A replaced command takes its aliases and its default status with it;
    /// only what the new node declares survives.
    pub fn register(&mut self, node: CommandNode) {
        let name = node.name().to_string();
        self.unregister(&name);
        for alias in node.aliases() {
            self.aliases.insert(alias.clone(), name.clone());
        }
        if node.is_application_default() {
            self.default = Some(DefaultTarget::Command(name.clone()));
        }
        self.commands.insert(name, node);
    }

    /// Register several commands in order.
    pub fn register_all(&mut self, nodes: impl IntoIterator<Item = CommandNode>) {
        for node in nodes {
            self.register(node);
        }
    }

    /// Register an executable option such as `version` (for `--version`).
    pub fn register_executable_option(&mut self, node: CommandNode) {
        let name = node.name().to_string();
        if self.executable_options.remove(&name).is_some() {
            self.option_aliases.retain(|_, target| *target != name);
            if self.default == Some(DefaultTarget::ExecutableOption(name.clone())) {
                self.default = None;
            }
        }
        for alias in node.aliases() {
            self.option_aliases.insert(alias.clone(), name.clone());
        }
        if node.is_application_default() {
            self.default = Some(DefaultTarget::ExecutableOption(name.clone()));
        }
        self.executable_options.insert(name, node);
    }

    /// Add an alias to an already registered command.
    pub fn register_alias(&mut self, command: &str, alias: &str) -> Result<(), RegistryError> {
        let node = self
            .commands
            .get_mut(command)
            .ok_or_else(|| RegistryError::UnknownCommand(command.to_string()))?;
        node.add_alias(alias);
        self.aliases.insert(alias.to_string(), command.to_string());
        Ok(())
    }

    /// Attach a subcommand to an already registered command.
    pub fn register_subcommand(
        &mut self,
        command: &str,
        subcommand: CommandNode,
    ) -> Result<(), RegistryError> {
        self.commands
            .get_mut(command)
            .ok_or_else(|| RegistryError::UnknownCommand(command.to_string()))?
            .add_subcommand(subcommand);
        Ok(())
    }

    /// Make a registered command the application default.
    pub fn set_default(&mut self, command: &str) -> Result<(), RegistryError> {
        if !self.commands.contains_key(command) {
            return Err(RegistryError::UnknownCommand(command.to_string()));
        }
        self.default = Some(DefaultTarget::Command(command.to_string()));
        Ok(())
    }

    /// Make a registered executable option the application default.
    pub fn set_default_executable_option(&mut self, option: &str) -> Result<(), RegistryError> {
        if !self.executable_options.contains_key(option) {
            return Err(RegistryError::UnknownExecutableOption(option.to_string()));
        }
        self.default = Some(DefaultTarget::ExecutableOption(option.to_string()));
        Ok(())
    }

    /// Remove a command, its aliases, and the default if it pointed here.
    ///
    /// Returns the removed node.
    pub fn unregister(&mut self, command: &str) -> Option<CommandNode> {
        let node = self.commands.remove(command)?;
        self.aliases.retain(|_, target| target != command);
        if self.default == Some(DefaultTarget::Command(command.to_string())) {
            self.default = None;
        }
        Some(node)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve a command by exact name, then by alias.
    pub fn lookup(&self, name: &str) -> Result<&CommandNode, RegistryError> {
        if let Some(node) = self.commands.get(name) {
            return Ok(node);
        }
        self.aliases
            .get(name)
            .and_then(|canonical| self.commands.get(canonical))
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))
    }

    /// Resolve an executable option by exact name, then by alias.
    pub fn lookup_executable_option(&self, name: &str) -> Option<&CommandNode> {
        self.executable_options.get(name).or_else(|| {
            self.option_aliases
                .get(name)
                .and_then(|canonical| self.executable_options.get(canonical))
        })
    }

    /// Whether `name` resolves to an executable option.
    pub fn is_executable_option(&self, name: &str) -> bool {
        self.lookup_executable_option(name).is_some()
    }

    /// The application default node, if any.
    pub fn default_node(&self) -> Option<&CommandNode> {
        match self.default.as_ref()? {
            DefaultTarget::Command(name) => self.commands.get(name),
            DefaultTarget::ExecutableOption(name) => self.executable_options.get(name),
        }
    }

    /// Whether a default is configured.
    pub fn has_default(&self) -> bool {
        self.default_node().is_some()
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Every registered command, sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &CommandNode> {
        self.commands.values()
    }

    /// Commands for listings, sorted by name, without `help` and `list`.
    pub fn list_commands(&self) -> Vec<&CommandNode> {
        self.commands
            .values()
            .filter(|node| !is_listing_command(node.name()))
            .collect()
    }

    /// Executable options, sorted by name.
    pub fn list_executable_options(&self) -> Vec<&CommandNode> {
        self.executable_options.values().collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
