//! engine
//!
//! Command resolution and dispatch.
//!
//! # Architecture
//!
//! ```text
//! Invocation -> Dispatcher (Registry) -> Callable
//!                    |
//!                    +-> DispatchError -> classify -> Verdict (message, exit code)
//! ```
//!
//! - [`registry`] - Commands, aliases, executable options and the default
//! - [`invocation`] - The tokenized command line
//! - [`dispatch`] - The ordered resolution procedure and invocation
//! - [`failure`] - Failure taxonomy and the exit-code classifier
//! - [`mirror`] - Read-only catalog snapshot handed to commands
//! - [`cleanup`] - Version-tagged, run-once cleanup actions
//!
//! # Invariants
//!
//! - The registry is read-only during dispatch
//! - Dispatch reports failures as values; only the application prints them
//! - A callable never runs with fewer arguments than it requires
//!
//! # Example
//!
//! ```ignore
//! use switchyard::engine::{classify, Dispatcher, Invocation, Mirror, Registry};
//!
//! let dispatcher = Dispatcher::new(&registry, Verbosity::Normal);
//! match dispatcher.dispatch(&Invocation::parse(argv), &mut output, &mirror, &cookies) {
//!     Ok(_) => 0,
//!     Err(err) => classify("yard", err, || usage())?.exit_code,
//! }
//! ```

pub mod cleanup;
pub mod dispatch;
pub mod failure;
pub mod invocation;
pub mod mirror;
pub mod registry;

pub use cleanup::{CleanupActions, CleanupReport, CLEANUP_SECTION};
pub use dispatch::{Dispatcher, Origin, Resolved};
pub use failure::{classify, DispatchError, Rendering, Verdict, FAILURE_EXIT_CODE};
pub use invocation::Invocation;
pub use mirror::{CommandMirror, Mirror, OptionMirror};
pub use registry::{Registry, RegistryError};
