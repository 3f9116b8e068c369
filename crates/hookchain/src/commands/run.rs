//! `hookchain run`

use hookchain_core::builtin::{context_registry, message_registry};
use hookchain_core::{
    CommitMessage, ConsoleStatusReporter, Error, HookContext, HookEvent, HooksConfig,
    OutputSink, Result,
};
use tracing::{debug, instrument};

/// Run the hooks configured for `event`, printing status lines to `sink`.
///
/// Message events read the commit message from the file named by the first
/// argument and write the final message back once every hook succeeded.
/// All hooks are resolved before the first one runs, so a configuration
/// error never leaves a status line behind.
///
/// # Errors
///
/// Returns resolution errors, I/O errors on the message file, or the error
/// of the hook that stopped the chain.
#[instrument(skip(config, sink), fields(hooks = config.entries(event).len()))]
pub fn execute_run<S: OutputSink>(
    config: &HooksConfig,
    event: HookEvent,
    args: Vec<String>,
    sink: S,
) -> Result<S> {
    let mut reporter = ConsoleStatusReporter::new(sink);

    if event.is_message_event() {
        let pipeline = message_registry().pipeline(event, config)?;
        if pipeline.is_empty() {
            debug!("No hooks configured");
            return Ok(reporter.into_sink());
        }

        let file = args.first().ok_or_else(|| {
            Error::configuration(format!(
                "{event} expects the commit message file as its first argument"
            ))
        })?;
        let message = CommitMessage::from_file(file)?;
        let message = pipeline.run(message, &mut reporter)?;
        message.save()?;
    } else {
        let pipeline = context_registry().pipeline(event, config)?;
        pipeline.run(HookContext::new(event, args), &mut reporter)?;
    }

    Ok(reporter.into_sink())
}
