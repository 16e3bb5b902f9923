//! Macros for ergonomic state machine construction.

/// Build a `Vec<EventDesc>` from a compact table.
///
/// Each row reads `"event": [sources...] => destination`.
///
/// # Example
///
/// ```
/// use fsm_engine::events;
///
/// let table = events! {
///     "warn": ["green"] => "yellow",
///     "panic": ["yellow", "green"] => "red",
///     "calm": ["red"] => "yellow",
///     "clear": ["yellow"] => "green",
/// };
///
/// assert_eq!(table.len(), 4);
/// assert_eq!(table[1].src, vec!["yellow", "green"]);
/// ```
#[macro_export]
macro_rules! events {
    (
        $(
            $name:literal : [$($src:expr),+ $(,)?] => $dst:expr
        ),* $(,)?
    ) => {
        vec![
            $(
                $crate::core::EventDesc::new($name, [$($src),+], $dst)
            ),*
        ]
    };
}
