//! Errors returned by event dispatch and transition completion.

use crate::core::BoxError;
use thiserror::Error;

/// Errors from [`Fsm::event`](crate::Fsm::event) and
/// [`Fsm::transition`](crate::Fsm::transition).
///
/// Every variant except [`FsmError::NoTransition`] and
/// [`FsmError::Callback`] is produced before the current state changes.
#[derive(Debug, Error)]
pub enum FsmError {
    /// The event appears nowhere in the transition table.
    #[error("event {event} does not exist")]
    UnknownEvent { event: String },

    /// The event exists but has no transition from the current state.
    #[error("event {event} inappropriate in current state {state}")]
    InvalidEvent { event: String, state: String },

    /// A deferred transition is still waiting for completion.
    #[error("event {event} inappropriate because previous transition did not complete")]
    InTransition { event: String },

    /// Completion was requested with nothing pending.
    #[error("transition inappropriate because no state change in progress")]
    NotInTransition,

    /// A callback cancelled the transition. The state is unchanged.
    #[error("transition canceled{}", with_reason(.0))]
    Canceled(Option<BoxError>),

    /// The transition was deferred; the state changes on completion.
    #[error("async started{}", with_reason(.0))]
    Async(Option<BoxError>),

    /// The event was valid but leads back to the current state.
    #[error("no transition{}", with_reason(.0))]
    NoTransition(Option<BoxError>),

    /// A callback reported an error; the transition still committed.
    #[error(transparent)]
    Callback(BoxError),
}

fn with_reason(reason: &Option<BoxError>) -> String {
    match reason {
        Some(err) => format!(" with error: {err}"),
        None => String::new(),
    }
}

impl FsmError {
    /// Error a callback attached to this outcome, if any.
    pub fn reason(&self) -> Option<&BoxError> {
        match self {
            FsmError::Canceled(reason)
            | FsmError::Async(reason)
            | FsmError::NoTransition(reason) => reason.as_ref(),
            FsmError::Callback(err) => Some(err),
            _ => None,
        }
    }

    /// True when a deferred transition is waiting for completion.
    pub fn is_state_change_pending(&self) -> bool {
        matches!(self, FsmError::Async(_))
    }

    /// True for outcomes that are signals rather than failures: a deferred
    /// or same-state transition that no callback attached an error to.
    pub fn is_benign(&self) -> bool {
        matches!(self, FsmError::Async(None) | FsmError::NoTransition(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_event_and_state() {
        let err = FsmError::InvalidEvent {
            event: "close".into(),
            state: "closed".into(),
        };
        assert_eq!(
            err.to_string(),
            "event close inappropriate in current state closed"
        );

        let err = FsmError::UnknownEvent {
            event: "lock".into(),
        };
        assert_eq!(err.to_string(), "event lock does not exist");
    }

    #[test]
    fn wrapping_variants_append_reason() {
        assert_eq!(FsmError::Canceled(None).to_string(), "transition canceled");
        assert_eq!(
            FsmError::Canceled(Some("error".into())).to_string(),
            "transition canceled with error: error"
        );
        assert_eq!(
            FsmError::Async(Some("busy".into())).to_string(),
            "async started with error: busy"
        );
        assert_eq!(FsmError::NoTransition(None).to_string(), "no transition");
    }

    #[test]
    fn callback_error_is_transparent() {
        let err = FsmError::Callback("error".into());
        assert_eq!(err.to_string(), "error");
        assert_eq!(err.reason().map(|r| r.to_string()), Some("error".into()));
    }

    #[test]
    fn classification() {
        assert!(FsmError::Async(None).is_state_change_pending());
        assert!(FsmError::Async(None).is_benign());
        assert!(FsmError::NoTransition(None).is_benign());
        assert!(!FsmError::NoTransition(Some("x".into())).is_benign());
        assert!(!FsmError::Canceled(None).is_benign());
        assert!(FsmError::NotInTransition.reason().is_none());
    }
}
