//! Core transition-table, callback and event-context types.
//!
//! This module contains the building blocks the engine is assembled from:
//! - The compiled transition table (`TransitionTable`) built from `EventDesc` values
//! - Callback hooks (`Hook`) and their ordered resolution (`Callbacks`)
//! - The per-dispatch event context (`Event`)
//!
//! Nothing in this module takes a lock except `Event::current`, which reads
//! the machine's shared state cell.

mod event;
mod hook;
mod table;

pub use event::{Arg, BoxError, Event};
pub(crate) use event::StateCell;
pub use hook::{Action, Callback, Callbacks, Hook, Phase};
pub use table::{EventDesc, Lookup, TransitionTable};
