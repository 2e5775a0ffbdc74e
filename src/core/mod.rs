//! core
//!
//! Supporting primitives shared by the engine and the application layer.
//!
//! # Modules
//!
//! - [`config`] - Settings schema and loading
//! - [`fs`] - Directory handles and path deletion
//! - [`paths`] - Centralized path routing for application storage
//! - [`version`] - Dotted version parsing and comparison

pub mod config;
pub mod fs;
pub mod paths;
pub mod version;
