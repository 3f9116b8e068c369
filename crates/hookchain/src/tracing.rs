//! Tracing setup for the hookchain CLI
//!
//! Logs always go to stderr; stdout is reserved for hook status lines.

use std::io;
pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Tracing output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
    /// Structured JSON format
    Json,
}

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above
    Info,
    /// Show warnings and above (default)
    Warn,
    /// Show errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format
    pub format: TracingFormat,
    /// Level applied to hookchain targets when `RUST_LOG` is unset
    pub level: Level,
}

/// Global correlation ID for tracing request correlation
static CORRELATION_ID: std::sync::OnceLock<Uuid> = std::sync::OnceLock::new();

/// Get or create a correlation ID for the current process
pub fn correlation_id() -> Uuid {
    *CORRELATION_ID.get_or_init(Uuid::new_v4)
}

/// Filter directive applying `level` to the hookchain crates
fn default_directive(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("hookchain={level},hookchain_core={level}")
}

/// Initialize tracing with the given configuration
///
/// # Errors
///
/// Returns an error if the default filter directive does not parse or a
/// global subscriber is already installed.
pub fn init_tracing(config: TracingConfig) -> miette::Result<()> {
    let correlation_id = correlation_id();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config.level)))
        .map_err(|e| miette::miette!("Failed to create tracing filter: {e}"))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = match config.format {
        TracingFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true);
            registry.with(layer).try_init()
        }
        TracingFormat::Compact => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false);
            registry.with(layer).try_init()
        }
        TracingFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true);
            registry.with(layer).try_init()
        }
    };
    initialized.map_err(|e| miette::miette!("Failed to install tracing subscriber: {e}"))?;

    tracing::debug!(
        correlation_id = %correlation_id,
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Tracing initialized for hookchain"
    );

    Ok(())
}
