//! Builder for constructing state machines.

use crate::builder::config::MachineConfig;
use crate::builder::error::BuildError;
use crate::core::{Action, Callbacks, Event, EventDesc, Hook, TransitionTable};
use crate::engine::Fsm;

/// Builder for constructing machines with a fluent API.
///
/// Unlike [`Fsm::new`], `build()` validates the table: two definitions that
/// send the same event from the same state to different destinations are
/// rejected unless [`FsmBuilder::allow_overwrite`] is set.
///
/// # Example
///
/// ```rust
/// use fsm_engine::{FsmBuilder, Hook, Phase};
///
/// let fsm = FsmBuilder::new()
///     .initial("closed")
///     .event("open", ["closed"], "open")
///     .event("close", ["open"], "closed")
///     .on(Hook::Any(Phase::Enter), |_, e| println!("door is {}", e.dst()))
///     .build()
///     .unwrap();
///
/// fsm.event("open").unwrap();
/// assert!(fsm.is("open"));
/// ```
#[derive(Default)]
pub struct FsmBuilder {
    initial: Option<String>,
    events: Vec<EventDesc>,
    callbacks: Callbacks,
    allow_overwrite: bool,
}

impl FsmBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from a declarative configuration.
    pub fn from_config(config: MachineConfig) -> Self {
        Self {
            initial: Some(config.initial),
            events: config.events,
            callbacks: Callbacks::new(),
            allow_overwrite: config.allow_overwrite,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add an event definition.
    pub fn event<I, S>(mut self, name: impl Into<String>, src: I, dst: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events.push(EventDesc::new(name, src, dst));
        self
    }

    /// Add multiple event definitions at once.
    pub fn events(mut self, events: impl IntoIterator<Item = EventDesc>) -> Self {
        self.events.extend(events);
        self
    }

    /// Register a callback.
    pub fn on<F>(mut self, hook: Hook, callback: F) -> Self
    where
        F: Fn(Action, &mut Event) + Send + Sync + 'static,
    {
        self.callbacks.insert(hook, callback);
        self
    }

    /// Use a prepared callback registry, replacing anything registered so far.
    pub fn callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Let later definitions silently replace earlier conflicting ones.
    pub fn allow_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }

    /// Build the machine.
    /// Returns an error if the initial state is missing or the table is
    /// malformed.
    pub fn build(self) -> Result<Fsm, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        for desc in &self.events {
            if desc.name.is_empty() {
                return Err(BuildError::EmptyEventName);
            }
            if desc.src.is_empty() {
                return Err(BuildError::NoSourceStates {
                    event: desc.name.clone(),
                });
            }
        }

        if !self.allow_overwrite {
            if let Some((event, state, first, second)) =
                TransitionTable::conflicts(&self.events).into_iter().next()
            {
                return Err(BuildError::ConflictingTransition {
                    event,
                    state,
                    first,
                    second,
                });
            }
        }

        let table = TransitionTable::build(&self.events);
        tracing::debug!(
            initial = %initial,
            transitions = table.len(),
            callbacks = self.callbacks.len(),
            "built state machine"
        );

        Ok(Fsm::from_parts(initial, table, self.callbacks))
    }
}
