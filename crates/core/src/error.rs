//! Error types for the hookchain-core crate

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for hookchain operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    #[diagnostic(code(hookchain::config::invalid))]
    Configuration {
        /// The error message describing the configuration issue
        message: String,
    },

    /// The configuration file could not be parsed
    #[error("Failed to parse {}: {message}", path.display())]
    #[diagnostic(
        code(hookchain::config::parse),
        help("Each entry is a hook identifier or a table mapping identifiers to parameter tables")
    )]
    ConfigParse {
        /// Path of the configuration file
        path: PathBuf,
        /// The parser message
        message: String,
    },

    /// A configuration key or argument is not a supported git hook
    #[error("Unknown git hook event '{name}'")]
    #[diagnostic(
        code(hookchain::event::unknown),
        help(
            "Supported events: pre-commit, prepare-commit-msg, commit-msg, post-commit, pre-rebase, post-rewrite, post-checkout, post-merge, pre-push"
        )
    )]
    UnknownEvent {
        /// The name that failed to parse
        name: String,
    },

    /// A configured hook identifier has no registered factory
    #[error("Hook '{identifier}' configured for {event} is not registered")]
    #[diagnostic(code(hookchain::registry::unknown_hook))]
    UnknownHook {
        /// The identifier from the configuration
        identifier: String,
        /// The event whose entries were being resolved
        event: String,
        /// Identifiers the registry knows about
        #[help]
        available: Option<String>,
    },

    /// A hook factory rejected its parameters
    #[error("Invalid parameters for hook '{hook}': {message}")]
    #[diagnostic(code(hookchain::registry::invalid_parameters))]
    InvalidParameters {
        /// The hook identifier
        hook: String,
        /// Why the parameters were rejected
        message: String,
    },

    /// A hook failed while handling its payload
    #[error("Hook '{hook}' failed: {message}")]
    #[diagnostic(code(hookchain::hook::failed))]
    Execution {
        /// Display name of the failing hook
        hook: String,
        /// The failure description
        message: String,
    },

    /// I/O error with path context
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(hookchain::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<std::path::Path>>,
        /// Description of the operation that failed
        operation: String,
    },
}

impl Error {
    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown-event error
    pub fn unknown_event(name: impl Into<String>) -> Self {
        Self::UnknownEvent { name: name.into() }
    }

    /// Create a resolution error for an unregistered hook identifier
    pub fn unknown_hook(
        identifier: impl Into<String>,
        event: impl Into<String>,
        available: &[&str],
    ) -> Self {
        let available = if available.is_empty() {
            None
        } else {
            Some(format!("Registered hooks: {}", available.join(", ")))
        };
        Self::UnknownHook {
            identifier: identifier.into(),
            event: event.into(),
            available,
        }
    }

    /// Create a parameter validation error
    pub fn invalid_parameters(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a hook execution error
    pub fn execution(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(|p| p.into_boxed_path()),
            operation: operation.into(),
        }
    }

    /// Whether this error happened while resolving hooks, before any hook ran
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::UnknownHook { .. } | Self::InvalidParameters { .. }
        )
    }
}

/// Result type for hookchain operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_hook_lists_available() {
        let err = Error::unknown_hook("lint", "pre-commit", &["command", "message-prefix"]);
        assert_eq!(
            err.to_string(),
            "Hook 'lint' configured for pre-commit is not registered"
        );
        match err {
            Error::UnknownHook { available, .. } => {
                assert_eq!(
                    available.as_deref(),
                    Some("Registered hooks: command, message-prefix")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_hook_without_registrations() {
        let err = Error::unknown_hook("lint", "pre-commit", &[]);
        assert!(matches!(err, Error::UnknownHook { available: None, .. }));
    }

    #[test]
    fn test_resolution_classification() {
        assert!(Error::unknown_hook("a", "pre-commit", &[]).is_resolution());
        assert!(Error::invalid_parameters("a", "missing prefix").is_resolution());
        assert!(!Error::execution("a", "exit 1").is_resolution());
        assert!(!Error::configuration("bad").is_resolution());
    }

    #[test]
    fn test_execution_message() {
        let err = Error::execution("Rustfmt", "exited with status 1");
        assert_eq!(err.to_string(), "Hook 'Rustfmt' failed: exited with status 1");
    }
}
