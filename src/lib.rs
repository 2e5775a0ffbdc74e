//! Switchyard - command registry and dispatch for command-line applications
//!
//! Switchyard resolves a command line to exactly one registered command,
//! checks that it received enough arguments, hands it the application's
//! shared collaborators, runs it, and turns any failure into a message and
//! an exit status.
//!
//! # Architecture
//!
//! - [`command`] - Command nodes, callables, option slots, command errors
//! - [`engine`] - Registry, invocation, dispatch, failure classification
//! - [`app`] - Registration phase (`ApplicationBuilder`) and run phase (`Application`)
//! - [`builtins`] - `help`, `list`, `--help`, `--version`
//! - [`cookies`] - Persistent key/value store
//! - [`core`] - Settings, paths, directories, versions
//! - [`ui`] - Buffered output, listings, diagnostics
//! - [`shell`] - External command execution
//!
//! # Correctness Invariants
//!
//! 1. Registration completes before the first dispatch
//! 2. The first registered executable-option flag beats any command name
//! 3. Subcommand descent happens at most once per invocation
//! 4. Every classified failure maps to exactly one rendering and exit status

pub mod app;
pub mod builtins;
pub mod command;
pub mod cookies;
pub mod core;
pub mod engine;
pub mod shell;
pub mod ui;
