//! Sequential hook pipeline
//!
//! A [`Pipeline`] threads one payload through its hooks in declared order.
//! Each hook gets a [`Next`] pointing at the hook after it; the `Next` past the
//! last hook returns the payload unchanged.

use crate::hook::{Hook, PipeObserver};
use crate::Result;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// An ordered list of hooks sharing one payload type
pub struct Pipeline<P> {
    hooks: Vec<Box<dyn Hook<P>>>,
}

impl<P> Pipeline<P> {
    /// Create a pipeline that runs `hooks` in the given order
    #[must_use]
    pub fn new(hooks: Vec<Box<dyn Hook<P>>>) -> Self {
        Self { hooks }
    }

    /// Append an already built hook
    pub fn push<H>(&mut self, hook: H)
    where
        H: Hook<P> + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Number of hooks in the pipeline
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the pipeline has no hooks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|hook| hook.name())
    }

    /// Run the payload through every hook.
    ///
    /// `observer` is told when each hook starts and finishes. The result is
    /// whatever the chain produced: the payload as it left the last hook, or
    /// the value returned by a hook that stopped the chain.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing hook, after the observer was
    /// told that hook finished unsuccessfully.
    pub fn run(&self, payload: P, observer: &mut dyn PipeObserver) -> Result<P> {
        let started = Instant::now();
        let mut state = RunState::default();

        let result = Next {
            hooks: &self.hooks,
            index: 0,
            observer,
            state: &mut state,
        }
        .run(payload);

        info!(
            hooks = self.hooks.len(),
            success = result.is_ok(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Hook pipeline finished"
        );

        result
    }
}

impl<P> Default for Pipeline<P> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<P> fmt::Debug for Pipeline<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Bookkeeping shared by every frame of one run
#[derive(Debug, Default)]
struct RunState {
    // Index of the hook whose status line is still open
    in_flight: Option<usize>,
    // Set once the observer was told about the error being propagated
    failure_reported: bool,
}

/// The rest of the chain, handed to a hook as its continuation
pub struct Next<'n, P> {
    hooks: &'n [Box<dyn Hook<P>>],
    index: usize,
    observer: &'n mut dyn PipeObserver,
    state: &'n mut RunState,
}

impl<P> Next<'_, P> {
    /// Continue the chain with `payload`.
    ///
    /// # Errors
    ///
    /// Returns the error raised by any of the remaining hooks.
    pub fn run(self, payload: P) -> Result<P> {
        let Self {
            hooks,
            index,
            observer,
            state,
        } = self;

        // The hook calling us has done its own work
        if let Some(previous) = state.in_flight.take() {
            debug!(index = previous, "Hook continued the chain");
            observer.pipe_finished(true);
        }

        let Some(hook) = hooks.get(index) else {
            return Ok(payload);
        };

        debug!(hook = hook.name(), index, "Starting hook");
        observer.pipe_started(hook.name());
        state.in_flight = Some(index);

        let result = hook.handle(
            payload,
            Next {
                hooks,
                index: index + 1,
                observer: &mut *observer,
                state: &mut *state,
            },
        );

        if state.in_flight == Some(index) {
            // Stopped the chain, or failed before continuing it
            state.in_flight = None;
            debug!(hook = hook.name(), success = result.is_ok(), "Hook finished");
            observer.pipe_finished(result.is_ok());
            state.failure_reported = result.is_err();
        } else if result.is_err() && !state.failure_reported {
            // Failed after continuing; its line already reads success
            debug!(hook = hook.name(), "Hook failed after continuing the chain");
            observer.pipe_failed(hook.name());
            state.failure_reported = true;
        }

        result
    }
}

impl<P> fmt::Debug for Next<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("index", &self.index)
            .field("remaining", &self.hooks.len().saturating_sub(self.index))
            .finish_non_exhaustive()
    }
}
