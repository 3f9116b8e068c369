//! The hook capability and the callbacks a pipeline reports to

use crate::Result;
use crate::pipeline::Next;

/// A named unit of work in a hook pipeline.
///
/// `handle` receives the payload by value together with the continuation for
/// the rest of the chain. Calling [`Next::run`] hands the (possibly changed)
/// payload to the following hook; returning without calling it stops the chain
/// and the returned value becomes the pipeline's result. `Next` is consumed
/// when it runs, so the chain can be continued at most once.
///
/// ```rust,ignore
/// struct Suffix(&'static str);
///
/// impl Hook<String> for Suffix {
///     fn name(&self) -> &str {
///         "Suffix"
///     }
///
///     fn handle(&self, payload: String, next: Next<'_, String>) -> Result<String> {
///         next.run(payload + self.0)
///     }
/// }
/// ```
pub trait Hook<P> {
    /// Human readable name shown in the status line
    fn name(&self) -> &str;

    /// Handle the payload and decide whether the chain continues
    ///
    /// # Errors
    ///
    /// Returns an error when the hook fails; the pipeline reports the failure
    /// and hands the error back to its caller unchanged.
    fn handle(&self, payload: P, next: Next<'_, P>) -> Result<P>;
}

/// Receives start/finish notifications while a pipeline runs.
///
/// Every hook that starts is finished exactly once, and notifications never
/// nest: a hook that continues the chain is finished with `true` before the
/// next one starts. A failing run produces exactly one failure notification,
/// either `pipe_finished(false)` for the hook still running or
/// [`pipe_failed`](Self::pipe_failed) for a hook that raised after continuing.
pub trait PipeObserver {
    /// A hook is about to handle the payload
    fn pipe_started(&mut self, name: &str);

    /// The hook that started last is done
    fn pipe_finished(&mut self, success: bool);

    /// `name` already finished successfully, then raised once the rest of
    /// the chain returned
    fn pipe_failed(&mut self, name: &str) {
        self.pipe_started(name);
        self.pipe_finished(false);
    }
}

/// Silent observer
impl PipeObserver for () {
    fn pipe_started(&mut self, _name: &str) {}

    fn pipe_finished(&mut self, _success: bool) {}
}

/// Observer built from a start callback and a finish callback
pub struct Callbacks<S, F> {
    on_start: S,
    on_finish: F,
}

impl<S, F> Callbacks<S, F>
where
    S: FnMut(&str),
    F: FnMut(bool),
{
    /// Pair a pipe-start callback with a pipe-end callback
    pub const fn new(on_start: S, on_finish: F) -> Self {
        Self {
            on_start,
            on_finish,
        }
    }
}

impl<S, F> PipeObserver for Callbacks<S, F>
where
    S: FnMut(&str),
    F: FnMut(bool),
{
    fn pipe_started(&mut self, name: &str) {
        (self.on_start)(name);
    }

    fn pipe_finished(&mut self, success: bool) {
        (self.on_finish)(success);
    }
}

impl<S, F> std::fmt::Debug for Callbacks<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_callbacks_forward_to_closures() {
        let seen = RefCell::new(Vec::new());
        let mut observer = Callbacks::new(
            |name: &str| seen.borrow_mut().push(format!("start {name}")),
            |success| seen.borrow_mut().push(format!("finish {success}")),
        );

        observer.pipe_started("lint");
        observer.pipe_finished(false);

        assert_eq!(*seen.borrow(), vec!["start lint", "finish false"]);
    }
}
