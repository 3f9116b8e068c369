//! Git hook pipelines for hookchain
//!
//! This crate provides the pieces a git hook invocation is built from:
//! - [`HooksConfig`] reads `hookchain.toml` and lists the hooks of an event
//! - [`HookRegistry`] turns configured identifiers into [`Hook`] instances
//! - [`Pipeline`] runs the hooks in order, each one deciding whether the
//!   chain continues
//! - [`ConsoleStatusReporter`] prints one status line per hook
//!
//! # Overview
//!
//! ```rust,ignore
//! use hookchain_core::{builtin, ConsoleStatusReporter, HookEvent, HooksConfig, TerminalSink};
//!
//! let config = HooksConfig::load("hookchain.toml")?;
//! let pipeline = builtin::message_registry().pipeline(HookEvent::CommitMsg, &config)?;
//! let mut reporter = ConsoleStatusReporter::new(TerminalSink::stdout());
//! let message = pipeline.run(CommitMessage::from_file(path)?, &mut reporter)?;
//! message.save()?;
//! ```
//!
//! Execution is strictly sequential. A hook that blocks blocks the chain.

pub mod builtin;
pub mod config;
pub mod error;
pub mod event;
pub mod hook;
pub mod payload;
pub mod pipeline;
pub mod registry;
pub mod reporter;

pub use config::{CONFIG_FILE_NAME, HookEntry, HookParams, HookSpec, HooksConfig};
pub use error::{Error, Result};
pub use event::HookEvent;
pub use hook::{Callbacks, Hook, PipeObserver};
pub use payload::{CommitMessage, HookContext};
pub use pipeline::{Next, Pipeline};
pub use registry::{HookFactory, HookRegistry};
pub use reporter::{ConsoleStatusReporter, MemorySink, OutputSink, TerminalSink};
