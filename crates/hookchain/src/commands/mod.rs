//! Subcommand implementations

pub mod git_hooks;
pub mod list;
pub mod run;

use hookchain_core::builtin::{context_registry, message_registry};
use hookchain_core::{Error, HookEvent, HooksConfig, Result};
use std::path::Path;
use tracing::info;

/// Load the configuration for this invocation.
///
/// A missing file means no hooks are configured, unless the path was given
/// explicitly. Every configured hook is resolved once so a bad entry fails
/// any invocation, not only the event it belongs to.
///
/// # Errors
///
/// Returns an error if the current directory is unreadable, the selected
/// file does not load, or a hook does not resolve.
pub fn load_config(explicit: Option<&Path>) -> Result<HooksConfig> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::io(e, None, "read current directory"))?;

    let Some(path) = git_hooks::locate_config(explicit, &cwd) else {
        info!("No hookchain.toml found, nothing to run");
        return Ok(HooksConfig::new());
    };

    let config = HooksConfig::load(path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve every configured hook with the registry matching its event
///
/// # Errors
///
/// Returns the first resolution error.
pub fn validate_config(config: &HooksConfig) -> Result<()> {
    message_registry().validate(config, HookEvent::is_message_event)?;
    context_registry().validate(config, |event| !event.is_message_event())
}

/// Parse an event name given on the command line
///
/// # Errors
///
/// Returns [`Error::UnknownEvent`] for names that are not supported hooks.
pub fn parse_event(name: &str) -> Result<HookEvent> {
    name.parse()
}
