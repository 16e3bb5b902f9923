//! Build errors for machine construction and configuration.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Event name must not be empty")]
    EmptyEventName,

    #[error("Event '{event}' has no source states")]
    NoSourceStates { event: String },

    #[error(
        "Event '{event}' from '{state}' leads to both '{first}' and '{second}'. \
         Remove one definition or call .allow_overwrite(true)"
    )]
    ConflictingTransition {
        event: String,
        state: String,
        first: String,
        second: String,
    },

    #[error("Invalid machine configuration: {0}")]
    Config(#[from] serde_json::Error),
}
