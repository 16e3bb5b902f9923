//! The event-dispatch engine.
//!
//! `Fsm` owns the current state and drives transitions through the
//! phases defined in [`crate::core`]:
//!
//! - **before**: the event is about to be processed, callbacks may cancel
//! - **leave**: the machine is leaving its state, callbacks may cancel or
//!   defer the commit
//! - **enter** / **after**: the new state is committed, callbacks observe it
//!
//! A deferred transition is held as a `PendingTransition` until
//! `Fsm::transition` completes it.

mod error;
mod machine;
mod transition;

pub use error::FsmError;
pub use machine::Fsm;
pub use transition::PendingTransition;
