//! Hooks shipped with hookchain and the default registries built from them

mod command;
mod message;

pub use command::{CommandEnv, CommandHook, CommandSpec};
pub use message::{MessagePatternHook, MessagePrefixHook};

use crate::config::HookParams;
use crate::hook::Hook;
use crate::payload::{CommitMessage, HookContext};
use crate::registry::HookRegistry;
use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Identifier of [`CommandHook`]
pub const COMMAND: &str = "command";
/// Identifier of [`MessagePrefixHook`]
pub const MESSAGE_PREFIX: &str = "message-prefix";
/// Identifier of [`MessagePatternHook`]
pub const MESSAGE_PATTERN: &str = "message-pattern";

/// Registry for events that run with a [`HookContext`]
#[must_use]
pub fn context_registry() -> HookRegistry<HookContext> {
    let mut registry = HookRegistry::new();
    registry.register(COMMAND, |params: &HookParams| {
        Ok(Box::new(CommandHook::from_params(params)?) as Box<dyn Hook<HookContext>>)
    });
    registry
}

/// Registry for `prepare-commit-msg` and `commit-msg`
#[must_use]
pub fn message_registry() -> HookRegistry<CommitMessage> {
    let mut registry = HookRegistry::new();
    registry.register(COMMAND, |params: &HookParams| {
        Ok(Box::new(CommandHook::from_params(params)?) as Box<dyn Hook<CommitMessage>>)
    });
    registry.register(MESSAGE_PREFIX, |params: &HookParams| {
        Ok(Box::new(MessagePrefixHook::from_params(params)?) as Box<dyn Hook<CommitMessage>>)
    });
    registry.register(MESSAGE_PATTERN, |params: &HookParams| {
        Ok(Box::new(MessagePatternHook::from_params(params)?) as Box<dyn Hook<CommitMessage>>)
    });
    registry
}

/// Deserialize a hook's parameter table into its typed form
fn parse_params<T: DeserializeOwned>(identifier: &str, params: &HookParams) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(params.clone()))
        .map_err(|e| Error::invalid_parameters(identifier, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registries() {
        assert_eq!(context_registry().identifiers(), vec![COMMAND]);
        assert_eq!(
            message_registry().identifiers(),
            vec![COMMAND, MESSAGE_PATTERN, MESSAGE_PREFIX]
        );
    }
}
