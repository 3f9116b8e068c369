//! Payloads threaded through hook pipelines

use crate::event::HookEvent;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Commit message handed to `prepare-commit-msg` and `commit-msg` hooks.
///
/// Hooks edit the text with [`set_message`](Self::set_message); the caller
/// writes the final text back with [`save`](Self::save).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    message: String,
    file: Option<PathBuf>,
    changed: bool,
}

impl CommitMessage {
    /// Message that is not backed by a file
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            changed: false,
        }
    }

    /// Read the message git wrote to `path`.
    ///
    /// Messages in another encoding (`i18n.commitEncoding`) are read lossily;
    /// the file is only rewritten if a hook changes the text.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| Error::io(e, Some(path.to_path_buf()), "read commit message"))?;
        Ok(Self {
            message: String::from_utf8_lossy(&bytes).into_owned(),
            file: Some(path.to_path_buf()),
            changed: false,
        })
    }

    /// The full message text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the message text
    pub fn set_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message != self.message {
            self.message = message;
            self.changed = true;
        }
    }

    /// Whether a hook changed the text since it was read
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// First line of the message, ignoring leading blank and `#` comment lines
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message
            .lines()
            .map(str::trim_end)
            .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .unwrap_or("")
    }

    /// The file backing this message, if any
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Write the message back to its file.
    ///
    /// Unchanged messages and messages without a file are left alone.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.file.as_ref().filter(|_| self.changed) else {
            return Ok(());
        };
        fs::write(path, &self.message)
            .map_err(|e| Error::io(e, Some(path.clone()), "write commit message"))
    }
}

/// Invocation context for hooks that do not receive a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    event: HookEvent,
    args: Vec<String>,
}

impl HookContext {
    /// Context for `event` with the arguments git passed to the hook script
    #[must_use]
    pub const fn new(event: HookEvent, args: Vec<String>) -> Self {
        Self { event, args }
    }

    /// The event being handled
    #[must_use]
    pub const fn event(&self) -> HookEvent {
        self.event
    }

    /// Raw hook arguments
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
