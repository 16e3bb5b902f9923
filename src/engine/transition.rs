//! Deferred transitions.

use crate::core::Event;

/// A transition whose leave phase has run but whose commit was deferred.
///
/// Owns the event context so the enter and after callbacks see the same
/// arguments and flags as the earlier phases. Consumed exactly once, either
/// by [`Fsm::transition`](crate::Fsm::transition) or by being discarded in
/// [`Fsm::set_state`](crate::Fsm::set_state).
#[derive(Debug)]
pub struct PendingTransition {
    event: Event,
}

impl PendingTransition {
    pub(crate) fn new(event: Event) -> Self {
        Self { event }
    }

    /// Event that started the transition.
    pub fn event(&self) -> &str {
        self.event.name()
    }

    /// State the transition started from.
    pub fn src(&self) -> &str {
        self.event.src()
    }

    /// State the transition will commit to.
    pub fn dst(&self) -> &str {
        self.event.dst()
    }

    pub(crate) fn into_event(self) -> Event {
        self.event
    }
}
