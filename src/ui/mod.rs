//! ui
//!
//! User-facing output utilities.
//!
//! # Modules
//!
//! - [`output`] - Buffered output sink and verbosity-gated diagnostics
//! - [`listing`] - Column-major item listings
//!
//! # Design
//!
//! Everything a command prints goes through the [`output::Output`] sink so the
//! application can flush it exactly once. Diagnostics go to stderr directly.

pub mod listing;
pub mod output;
