//! Command-line definition, error categories and exit codes

use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// A hook failed; git aborts the operation
pub const EXIT_HOOK: i32 = 1;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Unexpected runtime failure exit code
pub const EXIT_OTHER: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI, configuration or hook resolution error (exit code 2)
    #[error("Configuration error: {message}")]
    #[diagnostic(code(hookchain::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// A hook stopped the chain (exit code 1)
    #[error("Hook '{hook}' failed: {message}")]
    #[diagnostic(code(hookchain::cli::hook))]
    Hook {
        /// Display name of the failing hook
        hook: String,
        /// The failure reason
        message: String,
    },
    /// Other unexpected error (exit code 3)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(hookchain::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new other error with help text
    #[must_use]
    pub fn other_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Convert `hookchain_core::Error` to the matching `CliError` category.
///
/// - Hook failures -> Hook (exit code 1)
/// - Configuration, unknown events and resolution errors -> Config (exit code 2)
/// - I/O errors -> Other (exit code 3)
impl From<hookchain_core::Error> for CliError {
    fn from(err: hookchain_core::Error) -> Self {
        use hookchain_core::Error;

        match err {
            Error::Execution { hook, message } => Self::Hook { hook, message },
            Error::Configuration { message } => Self::config(message),
            Error::UnknownEvent { .. } => Self::config_with_help(
                err.to_string(),
                format!(
                    "Supported events: {}",
                    hookchain_core::HookEvent::ALL
                        .iter()
                        .map(|event| event.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ),
            Error::UnknownHook {
                ref available, ..
            } => match available.clone() {
                Some(help) => Self::config_with_help(err.to_string(), help),
                None => Self::config(err.to_string()),
            },
            Error::ConfigParse { .. } | Error::InvalidParameters { .. } => {
                Self::config(err.to_string())
            }
            Error::Io {
                source,
                path,
                operation,
            } => {
                let path_str = path
                    .as_ref()
                    .map_or(String::new(), |p| format!(" on {}", p.display()));
                Self::other_with_help(
                    format!("I/O {operation} failed{path_str}: {source}"),
                    "Check file permissions and ensure the path exists",
                )
            }
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Hook { .. } => EXIT_HOOK,
        CliError::Config { .. } => EXIT_CLI,
        CliError::Other { .. } => EXIT_OTHER,
    }
}

/// Render error appropriately based on JSON flag
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let envelope = serde_json::json!({
            "status": "error",
            "error": {
                "code": match err {
                    CliError::Config { .. } => "config",
                    CliError::Hook { .. } => "hook",
                    CliError::Other { .. } => "other",
                },
                "message": err.to_string(),
            },
        });
        match serde_json::to_string(&envelope) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
        let _ = io::stderr().flush();
    }
}

/// Run configured git hook pipelines.
#[derive(Parser, Debug)]
#[command(name = "hookchain")]
#[command(about = "Run configured git hook pipelines")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(
        long,
        global = true,
        help = "Set log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    /// Emit logs and errors as JSON.
    #[arg(long, global = true, help = "Emit logs and errors as JSON")]
    pub json: bool,

    /// Configuration file to use instead of discovering `hookchain.toml`.
    #[arg(
        long,
        global = true,
        env = "HOOKCHAIN_CONFIG",
        help = "Path to the hookchain configuration file"
    )]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log format to use; `--json` overrides `--log-format`
    #[must_use]
    pub const fn tracing_format(&self) -> TracingFormat {
        if self.json {
            TracingFormat::Json
        } else {
            self.log_format
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the hooks configured for a git hook event.
    #[command(about = "Run the hooks configured for a git hook event")]
    Run {
        /// Git hook event, e.g. `pre-commit` or `commit-msg`.
        event: String,
        /// Arguments git passed to the hook script.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List the configured hooks.
    #[command(about = "List the configured hooks per event")]
    List {
        /// Only list this event.
        event: Option<String>,
    },
}

/// Parse command-line arguments into a [`Cli`].
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_collects_hook_arguments() {
        let cli = Cli::try_parse_from([
            "hookchain",
            "run",
            "prepare-commit-msg",
            ".git/COMMIT_EDITMSG",
            "message",
        ])
        .unwrap();

        match cli.command.clone() {
            Commands::Run { event, args } => {
                assert_eq!(event, "prepare-commit-msg");
                assert_eq!(args, vec![".git/COMMIT_EDITMSG", "message"]);
            }
            Commands::List { .. } => panic!("expected run"),
        }
        assert_eq!(cli.level, LogLevel::Warn);
        assert!(!cli.json);
        assert_eq!(cli.tracing_format(), TracingFormat::Compact);
    }

    #[test]
    fn test_log_format_selection() {
        let cli = Cli::try_parse_from(["hookchain", "list", "--log-format", "pretty"]).unwrap();
        assert_eq!(cli.tracing_format(), TracingFormat::Pretty);

        let cli =
            Cli::try_parse_from(["hookchain", "--log-format", "pretty", "--json", "list"]).unwrap();
        assert_eq!(cli.tracing_format(), TracingFormat::Json);

        assert!(Cli::try_parse_from(["hookchain", "list", "--log-format", "dev"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hookchain",
            "list",
            "--config",
            "custom.toml",
            "-l",
            "debug",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.level, LogLevel::Debug);
        assert!(cli.json);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(EXIT_OK, 0);
        assert_eq!(exit_code_for(&CliError::config("bad")), EXIT_CLI);
        assert_eq!(
            exit_code_for(&CliError::other_with_help("boom", "retry")),
            EXIT_OTHER
        );

        let hook_err: CliError = hookchain_core::Error::execution("Rustfmt", "exit 1").into();
        assert_eq!(exit_code_for(&hook_err), EXIT_HOOK);
        assert_eq!(hook_err.to_string(), "Hook 'Rustfmt' failed: exit 1");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = hookchain_core::Error::unknown_hook("lint", "pre-commit", &["command"])
            .into();
        assert_eq!(exit_code_for(&err), EXIT_CLI);
        assert!(matches!(err, CliError::Config { help: Some(ref h), .. } if h.contains("command")));

        let err: CliError = hookchain_core::Error::unknown_event("pre-everything").into();
        assert_eq!(exit_code_for(&err), EXIT_CLI);

        let err: CliError = hookchain_core::Error::io(
            io::Error::new(io::ErrorKind::NotFound, "gone"),
            Some(PathBuf::from("/tmp/MSG")),
            "read commit message",
        )
        .into();
        assert_eq!(exit_code_for(&err), EXIT_OTHER);
        assert!(err.to_string().contains("/tmp/MSG"));
    }
}
