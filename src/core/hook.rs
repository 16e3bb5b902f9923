//! Callback hooks and the order in which they fire.
//!
//! Callbacks are registered under a [`Hook`] key. During a dispatch the
//! engine asks the [`Callbacks`] registry to resolve each [`Phase`] into an
//! ordered list of callbacks, each paired with the [`Action`] it is invoked
//! with.

use super::event::Event;
use std::collections::HashMap;
use std::fmt;

/// A point in the dispatch algorithm where a class of callbacks runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    Leave,
    Enter,
    After,
}

/// What a callback is being invoked for.
///
/// A callback registered under [`Hook::OnState`] fires for several kinds
/// of activity on its state and uses this tag to tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// An event is about to be processed
    BeforeEvent,
    /// The machine is leaving a state
    LeaveState,
    /// The machine has entered a state
    EnterState,
    /// An event has been processed
    AfterEvent,
    /// An event is being processed while the machine is in the hook's state
    OnEvent,
}

impl From<Phase> for Action {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Before => Action::BeforeEvent,
            Phase::Leave => Action::LeaveState,
            Phase::Enter => Action::EnterState,
            Phase::After => Action::AfterEvent,
        }
    }
}

/// Key a callback is registered under.
///
/// # Example
///
/// ```rust
/// use fsm_engine::core::{Hook, Phase};
///
/// let specific = Hook::Before("run".to_string());
/// let generic = Hook::Any(Phase::Before);
/// assert_ne!(specific, generic);
/// assert_eq!(Hook::before("run"), specific);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Before the named event
    Before(String),
    /// When leaving the named state
    Leave(String),
    /// When entering the named state
    Enter(String),
    /// After the named event
    After(String),
    /// Every event or state for the given phase
    Any(Phase),
    /// Shorthand for a state: fires on entering or leaving it, and once for
    /// every event processed while the machine is in it
    OnState(String),
    /// Shorthand for an event: fires after it
    OnEvent(String),
}

impl Hook {
    pub fn before(event: impl Into<String>) -> Self {
        Hook::Before(event.into())
    }

    pub fn leave(state: impl Into<String>) -> Self {
        Hook::Leave(state.into())
    }

    pub fn enter(state: impl Into<String>) -> Self {
        Hook::Enter(state.into())
    }

    pub fn after(event: impl Into<String>) -> Self {
        Hook::After(event.into())
    }

    pub fn on_state(state: impl Into<String>) -> Self {
        Hook::OnState(state.into())
    }

    pub fn on_event(event: impl Into<String>) -> Self {
        Hook::OnEvent(event.into())
    }

    /// Phase-qualified key for `phase` on `qualifier`.
    fn specific(phase: Phase, qualifier: &str) -> Self {
        let qualifier = qualifier.to_string();
        match phase {
            Phase::Before => Hook::Before(qualifier),
            Phase::Leave => Hook::Leave(qualifier),
            Phase::Enter => Hook::Enter(qualifier),
            Phase::After => Hook::After(qualifier),
        }
    }

    /// Shorthand key for `phase` on `qualifier`, if the phase has one.
    fn shorthand(phase: Phase, qualifier: &str) -> Option<Self> {
        match phase {
            Phase::Leave | Phase::Enter => Some(Hook::OnState(qualifier.to_string())),
            Phase::After => Some(Hook::OnEvent(qualifier.to_string())),
            Phase::Before => None,
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Before(e) => write!(f, "before_{e}"),
            Hook::Leave(s) => write!(f, "leave_{s}"),
            Hook::Enter(s) => write!(f, "enter_{s}"),
            Hook::After(e) => write!(f, "after_{e}"),
            Hook::Any(Phase::Before) => f.write_str("before_event"),
            Hook::Any(Phase::Leave) => f.write_str("leave_state"),
            Hook::Any(Phase::Enter) => f.write_str("enter_state"),
            Hook::Any(Phase::After) => f.write_str("after_event"),
            Hook::OnState(s) => f.write_str(s),
            Hook::OnEvent(e) => f.write_str(e),
        }
    }
}

/// Callback signature: the action kind plus the in-flight event context.
pub type Callback = Box<dyn Fn(Action, &mut Event) + Send + Sync>;

/// Registry of callbacks keyed by [`Hook`].
///
/// Keys are not checked against the transition table; a hook that never
/// matches is simply never invoked.
#[derive(Default)]
pub struct Callbacks {
    hooks: HashMap<Hook, Callback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `hook`, replacing any previous one.
    pub fn insert<F>(&mut self, hook: Hook, callback: F)
    where
        F: Fn(Action, &mut Event) + Send + Sync + 'static,
    {
        self.hooks.insert(hook, Box::new(callback));
    }

    /// Builder-style [`Callbacks::insert`].
    pub fn on<F>(mut self, hook: Hook, callback: F) -> Self
    where
        F: Fn(Action, &mut Event) + Send + Sync + 'static,
    {
        self.insert(hook, callback);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Ordered callbacks for one firing of `phase`.
    ///
    /// `qualifier` is the event name for the before/after phases and the
    /// state name for leave/enter. The order is: the phase-qualified hook,
    /// then the shorthand hook (leave, enter and after only), then the
    /// generic hook for the phase.
    pub fn resolve(&self, phase: Phase, qualifier: &str) -> Vec<(&Hook, &Callback, Action)> {
        let action = Action::from(phase);
        let mut keys = vec![Hook::specific(phase, qualifier)];
        keys.extend(Hook::shorthand(phase, qualifier));
        keys.push(Hook::Any(phase));

        keys.iter()
            .filter_map(|key| self.hooks.get_key_value(key))
            .map(|(hook, callback)| (hook, callback, action))
            .collect()
    }

    /// The shorthand callback for `state`, fired once per event processed
    /// while the machine is in that state.
    pub fn resident(&self, state: &str) -> Option<(&Hook, &Callback, Action)> {
        self.hooks
            .get_key_value(&Hook::OnState(state.to_string()))
            .map(|(hook, callback)| (hook, callback, Action::OnEvent))
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: Action, _: &mut Event) {}

    fn keys(resolved: Vec<(&Hook, &Callback, Action)>) -> Vec<String> {
        resolved
            .into_iter()
            .map(|(hook, _, _)| hook.to_string())
            .collect()
    }

    #[test]
    fn resolve_orders_specific_shorthand_generic() {
        let callbacks = Callbacks::new()
            .on(Hook::Any(Phase::Enter), noop)
            .on(Hook::on_state("end"), noop)
            .on(Hook::enter("end"), noop);

        assert_eq!(
            keys(callbacks.resolve(Phase::Enter, "end")),
            vec!["enter_end", "end", "enter_state"]
        );
    }

    #[test]
    fn before_phase_has_no_shorthand() {
        let callbacks = Callbacks::new()
            .on(Hook::on_event("run"), noop)
            .on(Hook::Any(Phase::Before), noop);

        assert_eq!(
            keys(callbacks.resolve(Phase::Before, "run")),
            vec!["before_event"]
        );
        assert_eq!(keys(callbacks.resolve(Phase::After, "run")), vec!["run"]);
    }

    #[test]
    fn leave_phase_uses_state_shorthand() {
        let callbacks = Callbacks::new().on(Hook::on_state("start"), noop);

        let resolved = callbacks.resolve(Phase::Leave, "start");
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].2, Action::LeaveState);
    }

    #[test]
    fn unmatched_hooks_are_ignored() {
        let callbacks = Callbacks::new().on(Hook::before("nothing"), noop);

        assert!(callbacks.resolve(Phase::Before, "run").is_empty());
        assert!(callbacks.resident("start").is_none());
    }

    #[test]
    fn resident_tags_on_event() {
        let callbacks = Callbacks::new().on(Hook::on_state("idle"), noop);

        let (hook, _, action) = callbacks.resident("idle").unwrap();
        assert_eq!(hook, &Hook::on_state("idle"));
        assert_eq!(action, Action::OnEvent);
    }

    #[test]
    fn insert_replaces_previous_callback() {
        let mut callbacks = Callbacks::new();
        callbacks.insert(Hook::before("run"), noop);
        callbacks.insert(Hook::before("run"), noop);

        assert_eq!(callbacks.len(), 1);
    }

    #[test]
    fn hook_display_matches_key_names() {
        assert_eq!(Hook::before("warn").to_string(), "before_warn");
        assert_eq!(Hook::leave("green").to_string(), "leave_green");
        assert_eq!(Hook::Any(Phase::Leave).to_string(), "leave_state");
        assert_eq!(Hook::on_state("closed").to_string(), "closed");
    }
}
