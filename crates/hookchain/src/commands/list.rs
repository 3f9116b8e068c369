//! `hookchain list`

use hookchain_core::builtin::{context_registry, message_registry};
use hookchain_core::{Error, HookEvent, HooksConfig, Result};
use std::io::Write;

/// Display names of the hooks configured for `event`, paired with their
/// identifiers, in run order
///
/// # Errors
///
/// Returns the resolution error of the first hook that cannot be built.
pub fn describe_event(config: &HooksConfig, event: HookEvent) -> Result<Vec<(String, String)>> {
    let names: Vec<String> = if event.is_message_event() {
        message_registry()
            .resolve(event, config)?
            .iter()
            .map(|hook| hook.name().to_string())
            .collect()
    } else {
        context_registry()
            .resolve(event, config)?
            .iter()
            .map(|hook| hook.name().to_string())
            .collect()
    };

    Ok(config
        .registered_hooks(event)
        .into_iter()
        .map(|spec| spec.identifier)
        .zip(names)
        .collect())
}

/// Write the configured hooks of `only` (or every configured event) to `out`
///
/// # Errors
///
/// Returns resolution errors and write failures.
pub fn execute_list(
    config: &HooksConfig,
    only: Option<HookEvent>,
    out: &mut impl Write,
) -> Result<()> {
    let events: Vec<HookEvent> = match only {
        Some(event) => vec![event],
        None => config.events().collect(),
    };

    let write_err = |e| Error::io(e, None, "write hook list");
    if events.is_empty() {
        writeln!(out, "No hooks configured").map_err(write_err)?;
        return Ok(());
    }

    for event in events {
        writeln!(out, "{event}").map_err(write_err)?;
        let hooks = describe_event(config, event)?;
        if hooks.is_empty() {
            writeln!(out, "  (none)").map_err(write_err)?;
        }
        for (position, (identifier, name)) in hooks.iter().enumerate() {
            writeln!(out, "  {}. {name} ({identifier})", position + 1).map_err(write_err)?;
        }
    }
    Ok(())
}
