//! Builder API for ergonomic machine construction.
//!
//! This module provides a validating fluent builder, a serde-backed
//! configuration format for transition tables, and the `events!` macro.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::MachineConfig;
pub use error::BuildError;
pub use machine::FsmBuilder;
