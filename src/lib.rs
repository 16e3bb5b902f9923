//! fsm-engine: an embeddable finite state machine engine
//!
//! A machine is described by a declarative transition table (event name,
//! legal source states, destination state) plus a set of callbacks keyed by
//! [`Hook`]. The engine drives one entity through that table, invokes the
//! callbacks in a fixed order, and lets callbacks cancel a transition or
//! defer its commit until the owner completes it.
//!
//! # Core Concepts
//!
//! - **Transition table**: compiled from [`EventDesc`] values, read-only afterwards
//! - **Hooks**: before / leave / enter / after phases, specific or generic
//! - **Event context**: the [`Event`] every callback of one dispatch shares
//! - **Engine**: [`Fsm`], safe to share between threads
//!
//! # Callback order
//!
//! For an event `e` moving from `s` to `d`:
//!
//! 1. `before_e`, `before_event`, then the resident hook of `s`
//! 2. `leave_s`, `s`, `leave_state`
//! 3. commit
//! 4. `enter_d`, `d`, `enter_state`
//! 5. `after_e`, `e`, `after_event`
//!
//! # Example
//!
//! ```rust
//! use fsm_engine::{events, Callbacks, Fsm, FsmError, Hook, Phase};
//!
//! let fsm = Fsm::new(
//!     "closed",
//!     events! {
//!         "open": ["closed"] => "open",
//!         "close": ["open"] => "closed",
//!     },
//!     Callbacks::new()
//!         .on(Hook::leave("closed"), |_, e| e.defer())
//!         .on(Hook::Any(Phase::Enter), |_, e| println!("entered {}", e.dst())),
//! );
//!
//! let err = fsm.event("open").unwrap_err();
//! assert!(matches!(err, FsmError::Async(None)));
//! assert_eq!(fsm.current(), "closed");
//!
//! fsm.transition().unwrap();
//! assert_eq!(fsm.current(), "open");
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, FsmBuilder, MachineConfig};
pub use crate::core::{Action, Arg, BoxError, Callbacks, Event, EventDesc, Hook, Phase};
pub use crate::engine::{Fsm, FsmError};
