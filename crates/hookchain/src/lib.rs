//! hookchain command-line interface
//!
//! Git invokes `hookchain run <event> [ARGS]...` from its hook scripts. The
//! binary loads `hookchain.toml`, builds the event's pipeline with the
//! built-in registries from [`hookchain_core::builtin`], and prints one status
//! line per hook on stdout. A failing hook exits with status 1 so git aborts
//! the operation.

pub mod cli;
pub mod commands;
pub mod tracing;
