//! hookchain CLI entry point
//!
//! Git hook scripts call `hookchain run <event> "$@"`; the exit status
//! decides whether git continues.

// CLI binary needs to output to stderr
#![allow(clippy::print_stderr)]

use hookchain::cli::{self, CliError, Commands, EXIT_OK, exit_code_for, render_error};
use hookchain::commands::{self, list, run};
use hookchain::tracing::{self, TracingConfig};
use hookchain_core::TerminalSink;
use std::io;

fn main() {
    // NOTE: eprintln! is used here because the tracing subscriber may be
    // unusable while panicking.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.tracing_format(),
        level: cli.level.into(),
    };
    if let Err(e) = tracing::init_tracing(tracing_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let exit_code = match dispatch(cli.command, cli.config.as_deref()) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            render_error(&err, cli.json);
            exit_code_for(&err)
        }
    };
    std::process::exit(exit_code);
}

fn dispatch(command: Commands, config: Option<&std::path::Path>) -> Result<(), CliError> {
    match command {
        Commands::Run { event, args } => {
            let event = commands::parse_event(&event)?;
            let config = commands::load_config(config)?;
            run::execute_run(&config, event, args, TerminalSink::stdout())?;
            Ok(())
        }
        Commands::List { event } => {
            let only = event.as_deref().map(commands::parse_event).transpose()?;
            let config = commands::load_config(config)?;
            list::execute_list(&config, only, &mut io::stdout().lock())?;
            Ok(())
        }
    }
}
