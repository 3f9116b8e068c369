//! Commit message hooks

use super::{MESSAGE_PATTERN, MESSAGE_PREFIX, parse_params};
use crate::config::HookParams;
use crate::hook::Hook;
use crate::payload::CommitMessage;
use crate::pipeline::Next;
use crate::{Error, Result};
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PrefixParams {
    prefix: String,
}

/// Prepends a fixed prefix to the commit message unless it is already there
#[derive(Debug, Clone)]
pub struct MessagePrefixHook {
    prefix: String,
}

impl MessagePrefixHook {
    /// Hook prepending `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Hook described by a parameter table with a `prefix` key
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `prefix` is missing or blank.
    pub fn from_params(params: &HookParams) -> Result<Self> {
        let PrefixParams { prefix } = parse_params(MESSAGE_PREFIX, params)?;
        if prefix.trim().is_empty() {
            return Err(Error::invalid_parameters(
                MESSAGE_PREFIX,
                "'prefix' must not be empty",
            ));
        }
        Ok(Self::new(prefix))
    }
}

impl Hook<CommitMessage> for MessagePrefixHook {
    fn name(&self) -> &str {
        "Commit message prefix"
    }

    fn handle(
        &self,
        mut message: CommitMessage,
        next: Next<'_, CommitMessage>,
    ) -> Result<CommitMessage> {
        if !message.message().starts_with(&self.prefix) {
            let prefixed = format!("{} {}", self.prefix, message.message());
            message.set_message(prefixed);
        }
        next.run(message)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternParams {
    pattern: String,
    #[serde(default)]
    help: Option<String>,
}

/// Fails the commit when the subject line does not match a regular expression
#[derive(Debug, Clone)]
pub struct MessagePatternHook {
    pattern: Regex,
    help: Option<String>,
}

impl MessagePatternHook {
    /// Hook requiring subjects to match `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `pattern` does not compile.
    pub fn new(pattern: &str, help: Option<String>) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::invalid_parameters(MESSAGE_PATTERN, e.to_string()))?;
        Ok(Self { pattern, help })
    }

    /// Hook described by a parameter table with `pattern` and optional `help`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for missing keys or a bad pattern.
    pub fn from_params(params: &HookParams) -> Result<Self> {
        let PatternParams { pattern, help } = parse_params(MESSAGE_PATTERN, params)?;
        Self::new(&pattern, help)
    }
}

impl Hook<CommitMessage> for MessagePatternHook {
    fn name(&self) -> &str {
        "Commit message format"
    }

    fn handle(
        &self,
        message: CommitMessage,
        next: Next<'_, CommitMessage>,
    ) -> Result<CommitMessage> {
        let subject = message.subject();
        if self.pattern.is_match(subject) {
            return next.run(message);
        }

        let mut reason = format!(
            "subject '{subject}' does not match /{}/",
            self.pattern.as_str()
        );
        if let Some(help) = &self.help {
            reason.push_str(": ");
            reason.push_str(help);
        }
        Err(Error::execution(self.name(), reason))
    }
}
