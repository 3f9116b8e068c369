//! Hook registry: maps configuration identifiers to hook factories.
//!
//! A [`HookRegistry`] is built once with every hook the binary knows about,
//! then resolves the configured entries of an event into hook instances.
//! Resolution happens before anything runs, so an unknown identifier or a bad
//! parameter set fails the whole event up front.

use crate::config::{HookParams, HooksConfig};
use crate::event::HookEvent;
use crate::hook::Hook;
use crate::pipeline::Pipeline;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Builds a hook from its configured parameters
pub type HookFactory<P> = Box<dyn Fn(&HookParams) -> Result<Box<dyn Hook<P>>>>;

/// Identifier -> factory table for hooks over payload `P`
pub struct HookRegistry<P> {
    factories: HashMap<String, HookFactory<P>>,
}

impl<P: 'static> HookRegistry<P> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under `identifier`, replacing any previous one
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn(&HookParams) -> Result<Box<dyn Hook<P>>> + 'static,
    {
        self.factories.insert(identifier.into(), Box::new(factory));
    }

    /// Register a pre-built hook; every resolution gets its own clone
    pub fn register_instance<H>(&mut self, identifier: impl Into<String>, hook: H)
    where
        H: Hook<P> + Clone + 'static,
    {
        self.register(identifier, move |_params: &HookParams| {
            Ok(Box::new(hook.clone()) as Box<dyn Hook<P>>)
        });
    }

    /// Whether `identifier` can be resolved
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }

    /// Build the hooks configured for `event`, in declared order
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHook`] for identifiers without a factory and
    /// whatever a factory returns for parameters it rejects.
    pub fn resolve(
        &self,
        event: HookEvent,
        config: &HooksConfig,
    ) -> Result<Vec<Box<dyn Hook<P>>>> {
        config
            .registered_hooks(event)
            .into_iter()
            .map(|spec| {
                let factory = self.factories.get(&spec.identifier).ok_or_else(|| {
                    Error::unknown_hook(&spec.identifier, event.as_str(), &self.identifiers())
                })?;
                let hook = factory(&spec.params)?;
                debug!(%event, identifier = %spec.identifier, hook = hook.name(), "Resolved hook");
                Ok(hook)
            })
            .collect()
    }

    /// Resolve the hooks of `event` straight into a [`Pipeline`]
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn pipeline(&self, event: HookEvent, config: &HooksConfig) -> Result<Pipeline<P>> {
        self.resolve(event, config).map(Pipeline::new)
    }

    /// Resolve every configured event accepted by `applies_to`, discarding the
    /// hooks. Used to reject bad configuration at load time.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error.
    pub fn validate(
        &self,
        config: &HooksConfig,
        applies_to: impl Fn(HookEvent) -> bool,
    ) -> Result<()> {
        for event in config.events().filter(|event| applies_to(*event)) {
            self.resolve(event, config)?;
        }
        Ok(())
    }
}

impl<P: 'static> Default for HookRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for HookRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut identifiers: Vec<&String> = self.factories.keys().collect();
        identifiers.sort_unstable();
        f.debug_struct("HookRegistry")
            .field("identifiers", &identifiers)
            .finish()
    }
}
