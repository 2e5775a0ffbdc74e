//! engine::mirror
//!
//! Read-only snapshot of the application handed to invoked commands.
//!
//! # Invariants
//!
//! - A mirror is a value: later registry changes are not reflected in it
//! - It holds descriptive metadata only, never callables, so a command cannot
//!   trigger a nested dispatch through it

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::registry::Registry;
use crate::command::CommandNode;
use crate::core::fs::Directory;

/// Descriptive snapshot of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMirror {
    pub name: String,
    pub description: String,
    pub aliases: Vec<String>,
    pub usage: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandMirror>,
}

impl CommandMirror {
    fn of(node: &CommandNode) -> Self {
        Self {
            name: node.name().to_string(),
            description: node.description().to_string(),
            aliases: node.aliases().to_vec(),
            usage: node.usage(),
            subcommands: node.subcommands().map(CommandMirror::of).collect(),
        }
    }

    /// Look up a direct subcommand.
    pub fn subcommand(&self, name: &str) -> Option<&CommandMirror> {
        self.subcommands.iter().find(|c| c.name == name)
    }
}

/// Descriptive snapshot of one executable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionMirror {
    pub name: String,
    pub description: String,
    pub aliases: Vec<String>,
}

/// Snapshot of application identity and the registered catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mirror {
    pub name: String,
    pub version: String,
    pub root_dir: Directory,
    pub data_dir: Option<Directory>,
    pub commands: Vec<CommandMirror>,
    pub options: Vec<OptionMirror>,
}

impl Mirror {
    /// A mirror with identity only and an empty catalog.
    pub fn bare(
        name: impl Into<String>,
        version: impl Into<String>,
        root_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            root_dir: Directory::new(root_dir),
            data_dir: None,
            commands: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Snapshot the current registry contents.
    ///
    /// Commands and options are listed sorted by name. Every registered
    /// command is included, `help` and `list` too.
    pub fn snapshot(
        name: &str,
        version: &str,
        root_dir: &Directory,
        data_dir: Option<&Directory>,
        registry: &Registry,
    ) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            root_dir: root_dir.clone(),
            data_dir: data_dir.cloned(),
            commands: registry.commands().map(CommandMirror::of).collect(),
            options: registry
                .list_executable_options()
                .into_iter()
                .map(|node| OptionMirror {
                    name: node.name().to_string(),
                    description: node.description().to_string(),
                    aliases: node.aliases().to_vec(),
                })
                .collect(),
        }
    }

    /// Application root directory.
    pub fn root(&self) -> &Path {
        self.root_dir.path()
    }

    /// Find a command by name, then by alias.
    pub fn command(&self, name: &str) -> Option<&CommandMirror> {
        self.commands
            .iter()
            .find(|c| c.name == name)
            .or_else(|| {
                self.commands
                    .iter()
                    .find(|c| c.aliases.iter().any(|a| a == name))
            })
    }

    /// Commands meant for listings: everything except `help` and `list`.
    pub fn listed_commands(&self) -> impl Iterator<Item = &CommandMirror> {
        self.commands
            .iter()
            .filter(|c| !super::registry::is_listing_command(&c.name))
    }
}
