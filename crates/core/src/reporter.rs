//! Console status lines for running hooks.
//!
//! Each hook gets one line. While it runs the line reads
//! `  HOOK  <name>: loading...`; when it finishes the line is rewritten in place
//! with `✔` or `failed`. Rewriting uses a carriage return followed by the ANSI
//! erase-line sequence, which is only emitted when the sink says it is
//! decorated. Undecorated sinks get a line break instead so the final status
//! starts on a fresh line.

use crate::hook::PipeObserver;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, IsTerminal, Write};
use tracing::warn;

/// Decorative tag in front of every hook name
pub const TASK_TAG: &str = " HOOK ";
/// Marker shown while a hook runs
pub const LOADING_TEXT: &str = "loading...";
/// Marker shown when a hook succeeded
pub const SUCCESS_GLYPH: &str = "✔";
/// Marker shown when a hook failed
pub const FAILURE_TEXT: &str = "failed";

/// Where status lines are written to
pub trait OutputSink {
    /// Write text without a line break
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write text followed by a line break
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Whether escape sequences (colors, cursor control) are safe to emit
    fn is_decorated(&self) -> bool;
}

/// Sink over any writer, flushed after every write
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    decorated: bool,
}

impl TerminalSink<io::Stdout> {
    /// Sink over stdout, decorated when stdout is a terminal and `NO_COLOR`
    /// is not set
    #[must_use]
    pub fn stdout() -> Self {
        let out = io::stdout();
        let decorated = out.is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { out, decorated }
    }
}

impl<W: Write> TerminalSink<W> {
    /// Wrap a writer; undecorated unless [`with_decorated`](Self::with_decorated)
    /// says otherwise
    pub const fn new(out: W) -> Self {
        Self {
            out,
            decorated: false,
        }
    }

    /// Override whether escape sequences are emitted
    #[must_use]
    pub const fn with_decorated(mut self, decorated: bool) -> Self {
        self.decorated = decorated;
        self
    }

    /// Give back the wrapped writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn is_decorated(&self) -> bool {
        self.decorated
    }
}

/// Sink that keeps every write as a separate chunk
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    decorated: bool,
    chunks: Vec<String>,
}

impl MemorySink {
    /// Undecorated in-memory sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory sink that accepts escape sequences
    #[must_use]
    pub fn decorated() -> Self {
        Self {
            decorated: true,
            chunks: Vec::new(),
        }
    }

    /// Chunks in write order; `writeln` produces one chunk ending in `\n`
    #[must_use]
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Everything written so far
    #[must_use]
    pub fn contents(&self) -> String {
        self.chunks.concat()
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.chunks.push(text.to_string());
        Ok(())
    }

    fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.chunks.push(format!("{text}\n"));
        Ok(())
    }

    fn is_decorated(&self) -> bool {
        self.decorated
    }
}

/// The escape sequence that erases the whole current line (`ESC[2K`)
#[must_use]
pub fn erase_line_sequence() -> String {
    let mut sequence = String::new();
    // Writing into a String cannot fail
    let _ = crossterm::Command::write_ansi(&Clear(ClearType::CurrentLine), &mut sequence);
    sequence
}

/// Renders one status line per hook onto an [`OutputSink`]
#[derive(Debug)]
pub struct ConsoleStatusReporter<S: OutputSink> {
    sink: S,
    executing: Option<String>,
}

impl<S: OutputSink> ConsoleStatusReporter<S> {
    /// Create a reporter writing to `sink`
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            executing: None,
        }
    }

    /// Name of the hook whose line is currently open
    #[must_use]
    pub fn executing(&self) -> Option<&str> {
        self.executing.as_deref()
    }

    /// Borrow the sink
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Label shared by the loading line and the final line of a hook
    #[must_use]
    pub fn task_title(&self, name: &str) -> String {
        if self.sink.is_decorated() {
            format!("  {} {name}", TASK_TAG.white().on_blue())
        } else {
            format!("  {TASK_TAG} {name}")
        }
    }

    fn styled(&self, text: &str, style: fn(&str) -> String) -> String {
        if self.sink.is_decorated() {
            style(text)
        } else {
            text.to_string()
        }
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "Failed to write hook status");
        }
    }
}

impl<S: OutputSink> PipeObserver for ConsoleStatusReporter<S> {
    fn pipe_started(&mut self, name: &str) {
        let line = format!(
            "{}: {}",
            self.task_title(name),
            self.styled(LOADING_TEXT, |text| text.yellow().to_string())
        );
        self.executing = Some(name.to_string());
        Self::report(self.sink.write(&line));
    }

    fn pipe_finished(&mut self, success: bool) {
        let Some(name) = self.executing.take() else {
            return;
        };

        if self.sink.is_decorated() {
            Self::report(self.sink.write("\r"));
            Self::report(self.sink.write(&erase_line_sequence()));
        } else {
            Self::report(self.sink.writeln(""));
        }

        let status = if success {
            self.styled(SUCCESS_GLYPH, |text| text.green().to_string())
        } else {
            self.styled(FAILURE_TEXT, |text| text.red().to_string())
        };
        let line = format!("{}: {status}", self.task_title(&name));
        Self::report(self.sink.writeln(&line));
    }

    fn pipe_failed(&mut self, name: &str) {
        // Its own line was closed when it continued; close anything left open
        self.pipe_finished(false);
        let line = format!(
            "{}: {}",
            self.task_title(name),
            self.styled(FAILURE_TEXT, |text| text.red().to_string())
        );
        Self::report(self.sink.writeln(&line));
    }
}
