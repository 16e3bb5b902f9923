//! Per-dispatch event context handed to every callback.

use super::hook::Phase;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque error a callback can report.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque argument passed through from the caller to callbacks.
pub type Arg = Box<dyn Any + Send + Sync>;

/// Shared handle to the machine's current state.
///
/// This is the narrow state lock; it is never held while callbacks run.
pub(crate) type StateCell = Arc<RwLock<String>>;

/// Context of one event dispatch.
///
/// Created by the engine for each call to [`Fsm::event`](crate::Fsm::event)
/// and passed by reference to every callback of that call. Callbacks use it
/// to inspect the transition, cancel it, defer it, or report an error.
pub struct Event {
    name: String,
    src: String,
    dst: String,
    /// Arguments supplied by the caller, in order
    pub args: Vec<Arg>,
    /// Error reported by a callback.
    ///
    /// Setting this without cancelling does not stop the transition; the
    /// error is returned to the caller alongside the state change.
    pub err: Option<BoxError>,
    canceled: bool,
    deferred: bool,
    phase: Phase,
    state: StateCell,
}

impl Event {
    pub(crate) fn new(
        name: &str,
        src: &str,
        dst: &str,
        args: Vec<Arg>,
        state: StateCell,
    ) -> Self {
        Self {
            name: name.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
            args,
            err: None,
            canceled: false,
            deferred: false,
            phase: Phase::Before,
            state,
        }
    }

    /// Name of the event being processed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// State the machine was in when the event arrived.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// State the event leads to.
    pub fn dst(&self) -> &str {
        &self.dst
    }

    /// Phase currently running.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Current state of the owning machine.
    ///
    /// Only takes the state lock, so it is safe to call from any callback.
    pub fn current(&self) -> String {
        self.state.read().clone()
    }

    /// Downcast argument `index` to `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsm_engine::{events, Arg, Callbacks, Fsm, Hook};
    ///
    /// let fsm = Fsm::new(
    ///     "start",
    ///     events! { "run": ["start"] => "end" },
    ///     Callbacks::new().on(Hook::on_event("run"), |_, e| {
    ///         assert_eq!(e.arg::<&str>(0), Some(&"test"));
    ///     }),
    /// );
    /// fsm.event_with_args("run", vec![Box::new("test") as Arg]).unwrap();
    /// ```
    pub fn arg<T: Any>(&self, index: usize) -> Option<&T> {
        self.args.get(index).and_then(|arg| arg.downcast_ref::<T>())
    }

    /// Cancel the transition.
    ///
    /// Only effective during the before and leave phases; once the new
    /// state is committed this does nothing.
    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::Before | Phase::Leave) {
            self.canceled = true;
        }
    }

    /// Cancel the transition and record `err` as the reason.
    pub fn cancel_with(&mut self, err: impl Into<BoxError>) {
        if matches!(self.phase, Phase::Before | Phase::Leave) {
            self.canceled = true;
            self.err = Some(err.into());
        }
    }

    /// Defer the commit until [`Fsm::transition`](crate::Fsm::transition)
    /// is called.
    ///
    /// Only effective during the leave phase.
    pub fn defer(&mut self) {
        if self.phase == Phase::Leave {
            self.deferred = true;
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    /// Record a non-cancelling error.
    pub fn set_error(&mut self, err: impl Into<BoxError>) {
        self.err = Some(err.into());
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("src", &self.src)
            .field("dst", &self.dst)
            .field("args", &self.args.len())
            .field("err", &self.err)
            .field("canceled", &self.canceled)
            .field("deferred", &self.deferred)
            .field("phase", &self.phase)
            .finish()
    }
}
