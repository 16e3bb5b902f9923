//! Event definitions and the compiled transition table.
//!
//! The table is built once from an ordered list of [`EventDesc`] values and
//! is read-only afterwards, so it can be shared between threads without
//! locking.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Declarative definition of one event.
///
/// Several definitions may share a `name` with disjoint `src` sets, which
/// models "same event, different outcome depending on the current state".
///
/// # Example
///
/// ```rust
/// use fsm_engine::core::EventDesc;
///
/// let reset = EventDesc::new("reset", ["one", "two", "three"], "one");
/// assert_eq!(reset.src.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDesc {
    /// Event name
    pub name: String,
    /// States the event is legal from
    #[serde(deserialize_with = "deserialize_sources")]
    pub src: Vec<String>,
    /// State the event leads to
    pub dst: String,
}

impl EventDesc {
    pub fn new<I, S>(name: impl Into<String>, src: I, dst: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            src: src.into_iter().map(Into::into).collect(),
            dst: dst.into(),
        }
    }
}

/// Accepts `"src": "a"` as well as `"src": ["a", "b"]`.
fn deserialize_sources<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sources {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Sources::deserialize(deserializer)? {
        Sources::One(s) => vec![s],
        Sources::Many(v) => v,
    })
}

/// Result of looking up an event in a given state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The event leads to this destination
    Found(&'a str),
    /// The event exists, but not from the queried state
    NotFromState,
    /// The event appears nowhere in the table
    Unknown,
}

/// Compiled `(event, source) -> destination` index.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    transitions: HashMap<(String, String), String>,
    known_events: HashSet<String>,
}

impl TransitionTable {
    /// Compile definitions in input order.
    ///
    /// A later definition for the same `(name, source)` pair overwrites an
    /// earlier one. Use [`TransitionTable::conflicts`] to detect that case.
    pub fn build<'a, I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = &'a EventDesc>,
    {
        let mut table = Self::default();
        for desc in definitions {
            for src in &desc.src {
                table
                    .transitions
                    .insert((desc.name.clone(), src.clone()), desc.dst.clone());
            }
            table.known_events.insert(desc.name.clone());
        }
        table
    }

    /// Destination of `event` from `state`, if one is defined.
    pub fn destination(&self, event: &str, state: &str) -> Option<&str> {
        // Tuple keys cannot be borrowed as (&str, &str), so build an owned key.
        self.transitions
            .get(&(event.to_string(), state.to_string()))
            .map(String::as_str)
    }

    /// Look up `event` from `state`, classifying a miss.
    pub fn lookup(&self, event: &str, state: &str) -> Lookup<'_> {
        match self.destination(event, state) {
            Some(dst) => Lookup::Found(dst),
            None if self.is_known_event(event) => Lookup::NotFromState,
            None => Lookup::Unknown,
        }
    }

    /// True if `event` appears in any definition, regardless of state.
    pub fn is_known_event(&self, event: &str) -> bool {
        self.known_events.contains(event)
    }

    /// Names of all events with a transition out of `state`, unordered.
    pub fn events_from(&self, state: &str) -> Vec<String> {
        self.transitions
            .keys()
            .filter(|(_, src)| src == state)
            .map(|(event, _)| event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Find `(event, source)` pairs mapped to two different destinations.
    ///
    /// Returns `(event, source, first_dst, second_dst)` for every conflict,
    /// in input order. Identical duplicates are not conflicts.
    pub fn conflicts<'a, I>(definitions: I) -> Vec<(String, String, String, String)>
    where
        I: IntoIterator<Item = &'a EventDesc>,
    {
        let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
        let mut conflicts = Vec::new();
        for desc in definitions {
            for src in &desc.src {
                let first = *seen
                    .entry((desc.name.as_str(), src.as_str()))
                    .or_insert(desc.dst.as_str());
                if first != desc.dst {
                    conflicts.push((
                        desc.name.clone(),
                        src.clone(),
                        first.to_string(),
                        desc.dst.clone(),
                    ));
                }
            }
        }
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> Vec<EventDesc> {
        vec![
            EventDesc::new("open", ["closed"], "open"),
            EventDesc::new("close", ["open"], "closed"),
        ]
    }

    #[test]
    fn lookup_finds_destination() {
        let table = TransitionTable::build(&door());

        assert_eq!(table.lookup("open", "closed"), Lookup::Found("open"));
        assert_eq!(table.lookup("close", "open"), Lookup::Found("closed"));
    }

    #[test]
    fn lookup_distinguishes_unknown_from_inapplicable() {
        let table = TransitionTable::build(&door());

        assert_eq!(table.lookup("close", "closed"), Lookup::NotFromState);
        assert_eq!(table.lookup("lock", "closed"), Lookup::Unknown);
        assert!(table.is_known_event("close"));
        assert!(!table.is_known_event("lock"));
    }

    #[test]
    fn multiple_sources_expand_to_entries() {
        let table = TransitionTable::build(&[EventDesc::new(
            "reset",
            ["one", "two", "three"],
            "one",
        )]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.destination("reset", "three"), Some("one"));
    }

    #[test]
    fn same_event_different_outcomes() {
        let table = TransitionTable::build(&[
            EventDesc::new("reset", ["one"], "reset_one"),
            EventDesc::new("reset", ["two"], "reset_two"),
        ]);

        assert_eq!(table.destination("reset", "one"), Some("reset_one"));
        assert_eq!(table.destination("reset", "two"), Some("reset_two"));
    }

    #[test]
    fn later_definition_overwrites_earlier() {
        let defs = vec![
            EventDesc::new("go", ["a"], "b"),
            EventDesc::new("go", ["a"], "c"),
        ];
        let table = TransitionTable::build(&defs);

        assert_eq!(table.destination("go", "a"), Some("c"));
        assert_eq!(
            TransitionTable::conflicts(&defs),
            vec![(
                "go".to_string(),
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            )]
        );
    }

    #[test]
    fn identical_duplicates_are_not_conflicts() {
        let defs = vec![
            EventDesc::new("go", ["a"], "b"),
            EventDesc::new("go", ["a", "x"], "b"),
        ];

        assert!(TransitionTable::conflicts(&defs).is_empty());
    }

    #[test]
    fn events_from_lists_outgoing_events() {
        let mut defs = door();
        defs.push(EventDesc::new("kick", ["closed"], "broken"));
        let table = TransitionTable::build(&defs);

        let mut events = table.events_from("closed");
        events.sort();
        assert_eq!(events, vec!["kick", "open"]);
        assert!(table.events_from("broken").is_empty());
    }

    #[test]
    fn desc_accepts_single_or_many_sources() {
        let one: EventDesc =
            serde_json::from_str(r#"{"name": "open", "src": "closed", "dst": "open"}"#).unwrap();
        let many: EventDesc =
            serde_json::from_str(r#"{"name": "reset", "src": ["a", "b"], "dst": "a"}"#).unwrap();

        assert_eq!(one, EventDesc::new("open", ["closed"], "open"));
        assert_eq!(many.src, vec!["a", "b"]);
    }
}
