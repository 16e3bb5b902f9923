//! The finite state machine engine.

use crate::core::{
    Action, Arg, Callback, Callbacks, Event, EventDesc, Hook, Lookup, Phase, StateCell,
    TransitionTable,
};
use crate::engine::error::FsmError;
use crate::engine::transition::PendingTransition;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// A finite state machine driven by named events.
///
/// Two locks guard the machine. The event lock serializes whole calls to
/// [`Fsm::event`] and [`Fsm::transition`], callbacks included. The state
/// lock guards only the current state and is never held while a callback
/// runs, so [`Fsm::current`] and the other queries may be called from
/// callbacks and from other threads at any time.
///
/// Calling [`Fsm::event`] or [`Fsm::transition`] from inside a callback on
/// the same thread deadlocks.
///
/// # Example
///
/// ```rust
/// use fsm_engine::{events, Callbacks, Fsm, FsmError};
///
/// let fsm = Fsm::new(
///     "closed",
///     events! {
///         "open": ["closed"] => "open",
///         "close": ["open"] => "closed",
///     },
///     Callbacks::new(),
/// );
///
/// assert!(matches!(fsm.event("close"), Err(FsmError::InvalidEvent { .. })));
/// fsm.event("open").unwrap();
/// assert_eq!(fsm.current(), "open");
/// ```
pub struct Fsm {
    state: StateCell,
    pending: Mutex<Option<PendingTransition>>,
    event_lock: Mutex<()>,
    table: TransitionTable,
    callbacks: Callbacks,
}

impl Fsm {
    /// Create a machine in `initial`.
    ///
    /// `initial` need not appear in any event definition; a machine with no
    /// way out of its state is valid, just inert. Duplicate `(event, source)`
    /// definitions are resolved last-write-wins; use
    /// [`FsmBuilder`](crate::FsmBuilder) to reject them instead.
    pub fn new<I>(initial: impl Into<String>, events: I, callbacks: Callbacks) -> Self
    where
        I: IntoIterator<Item = EventDesc>,
    {
        let events: Vec<EventDesc> = events.into_iter().collect();
        Self::from_parts(initial.into(), TransitionTable::build(&events), callbacks)
    }

    pub(crate) fn from_parts(
        initial: String,
        table: TransitionTable,
        callbacks: Callbacks,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            pending: Mutex::new(None),
            event_lock: Mutex::new(()),
            table,
            callbacks,
        }
    }

    /// Current state.
    pub fn current(&self) -> String {
        self.state.read().clone()
    }

    /// True if the machine is in `state`.
    pub fn is(&self, state: &str) -> bool {
        *self.state.read() == state
    }

    /// Force the machine into `state`.
    ///
    /// Bypasses callbacks and the transition table, and discards any
    /// pending deferred transition.
    pub fn set_state(&self, state: impl Into<String>) {
        let state = state.into();
        if let Some(pending) = self.pending.lock().take() {
            tracing::warn!(
                event = pending.event(),
                from = pending.src(),
                to = pending.dst(),
                "discarding pending transition"
            );
        }
        *self.state.write() = state;
    }

    /// True if `event` has a transition from the current state.
    pub fn can(&self, event: &str) -> bool {
        self.table.destination(event, &self.current()).is_some()
    }

    /// Negation of [`Fsm::can`].
    pub fn cannot(&self, event: &str) -> bool {
        !self.can(event)
    }

    /// Events with a transition from the current state, in no particular
    /// order.
    pub fn available_transitions(&self) -> Vec<String> {
        self.table.events_from(&self.current())
    }

    /// True while a deferred transition waits for [`Fsm::transition`].
    pub fn in_transition(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// The compiled transition table, for inspecting every defined
    /// transition regardless of the current state.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Process `name` without arguments.
    pub fn event(&self, name: &str) -> Result<(), FsmError> {
        self.event_with_args(name, Vec::new())
    }

    /// Process `name`, handing `args` to every callback.
    ///
    /// Callbacks run in this order: before (event), the resident hook of the
    /// current state, leave (current state), then after the commit enter
    /// (destination state) and after (event).
    ///
    /// # Errors
    ///
    /// - [`FsmError::InTransition`] if a deferred transition is pending
    /// - [`FsmError::UnknownEvent`] / [`FsmError::InvalidEvent`] if the
    ///   table has no transition for the event from the current state
    /// - [`FsmError::Canceled`] if a before or leave callback cancelled
    /// - [`FsmError::NoTransition`] if the event leads back to the current
    ///   state
    /// - [`FsmError::Async`] if a leave callback deferred the commit
    /// - [`FsmError::Callback`] if a callback set an error without cancelling;
    ///   the transition has still committed
    pub fn event_with_args<I>(&self, name: &str, args: I) -> Result<(), FsmError>
    where
        I: IntoIterator<Item = Arg>,
    {
        let _serial = self.event_lock.lock();

        if self.pending.lock().is_some() {
            return Err(FsmError::InTransition {
                event: name.to_string(),
            });
        }

        let src = self.current();
        let dst = match self.table.lookup(name, &src) {
            Lookup::Found(dst) => dst.to_string(),
            Lookup::NotFromState => {
                return Err(FsmError::InvalidEvent {
                    event: name.to_string(),
                    state: src,
                })
            }
            Lookup::Unknown => {
                return Err(FsmError::UnknownEvent {
                    event: name.to_string(),
                })
            }
        };

        let mut event = Event::new(
            name,
            &src,
            &dst,
            args.into_iter().collect(),
            Arc::clone(&self.state),
        );

        let proceed = self.run_phase(Phase::Before, name, &mut event)
            && self.run_resident(&src, &mut event)
            && self.run_phase(Phase::Leave, &src, &mut event);
        if !proceed {
            tracing::debug!(event = name, state = %src, "transition canceled");
            return Err(FsmError::Canceled(event.err.take()));
        }

        if src == dst {
            self.run_phase(Phase::After, name, &mut event);
            tracing::debug!(event = name, state = %src, "no state change");
            return Err(FsmError::NoTransition(event.err.take()));
        }

        if event.is_deferred() {
            let reason = event.err.take();
            tracing::debug!(event = name, from = %src, to = %dst, "transition deferred");
            *self.pending.lock() = Some(PendingTransition::new(event));
            return Err(FsmError::Async(reason));
        }

        self.commit(event)
    }

    /// Complete a deferred transition.
    ///
    /// Commits the new state and runs the enter and after callbacks exactly
    /// once. May be called from any thread, but not from a callback.
    ///
    /// # Errors
    ///
    /// [`FsmError::NotInTransition`] if nothing is pending, or
    /// [`FsmError::Callback`] if an enter/after callback set an error.
    pub fn transition(&self) -> Result<(), FsmError> {
        let _serial = self.event_lock.lock();
        let pending = self
            .pending
            .lock()
            .take()
            .ok_or(FsmError::NotInTransition)?;
        self.commit(pending.into_event())
    }

    /// Set the new state, then run the enter and after phases.
    fn commit(&self, mut event: Event) -> Result<(), FsmError> {
        let name = event.name().to_string();
        let dst = event.dst().to_string();

        *self.state.write() = dst.clone();
        tracing::debug!(event = %name, from = event.src(), to = %dst, "transition committed");

        self.run_phase(Phase::Enter, &dst, &mut event);
        self.run_phase(Phase::After, &name, &mut event);

        match event.err.take() {
            Some(err) => Err(FsmError::Callback(err)),
            None => Ok(()),
        }
    }

    /// Run every callback resolved for `phase`. Returns false as soon as one
    /// cancels the event.
    fn run_phase(&self, phase: Phase, qualifier: &str, event: &mut Event) -> bool {
        event.set_phase(phase);
        for resolved in self.callbacks.resolve(phase, qualifier) {
            invoke(resolved, event);
            if event.is_canceled() {
                return false;
            }
        }
        true
    }

    /// Run the resident hook of `state` as part of the before phase.
    fn run_resident(&self, state: &str, event: &mut Event) -> bool {
        if let Some(resolved) = self.callbacks.resident(state) {
            invoke(resolved, event);
        }
        !event.is_canceled()
    }
}

fn invoke((hook, callback, action): (&Hook, &Callback, Action), event: &mut Event) {
    tracing::trace!(hook = %hook, ?action, event = event.name(), "invoking callback");
    callback(action, event);
}

impl fmt::Debug for Fsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("current", &*self.state.read())
            .field("pending", &*self.pending.lock())
            .field("table", &self.table)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}
