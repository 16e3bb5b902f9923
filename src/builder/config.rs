//! Declarative machine configuration.
//!
//! A transition table can be kept outside the code as JSON:
//!
//! ```json
//! {
//!   "initial": "closed",
//!   "events": [
//!     {"name": "open", "src": "closed", "dst": "open"},
//!     {"name": "close", "src": ["open"], "dst": "closed"}
//!   ]
//! }
//! ```
//!
//! Callbacks are code and are attached afterwards through
//! [`FsmBuilder::from_config`](crate::FsmBuilder::from_config).

use crate::builder::error::BuildError;
use crate::core::EventDesc;
use serde::{Deserialize, Serialize};

/// Initial state plus transition table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// State the machine starts in
    pub initial: String,

    /// Event definitions, in order
    #[serde(default)]
    pub events: Vec<EventDesc>,

    /// Accept conflicting duplicate definitions (last one wins)
    #[serde(default)]
    pub allow_overwrite: bool,
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FsmBuilder;

    const DOOR: &str = r#"{
        "initial": "closed",
        "events": [
            {"name": "open", "src": "closed", "dst": "open"},
            {"name": "close", "src": ["open"], "dst": "closed"}
        ]
    }"#;

    #[test]
    fn parses_json_table() {
        let config = MachineConfig::from_json(DOOR).unwrap();

        assert_eq!(config.initial, "closed");
        assert_eq!(config.events.len(), 2);
        assert_eq!(config.events[0], EventDesc::new("open", ["closed"], "open"));
        assert!(!config.allow_overwrite);
    }

    #[test]
    fn configured_machine_runs() {
        let config = MachineConfig::from_json(DOOR).unwrap();
        let fsm = FsmBuilder::from_config(config).build().unwrap();

        fsm.event("open").unwrap();
        fsm.event("close").unwrap();
        assert_eq!(fsm.current(), "closed");
    }

    #[test]
    fn missing_initial_is_a_config_error() {
        let result = MachineConfig::from_json(r#"{"events": []}"#);

        assert!(matches!(result, Err(BuildError::Config(_))));
    }

    #[test]
    fn conflicting_config_is_rejected_at_build() {
        let config = MachineConfig::from_json(
            r#"{
                "initial": "a",
                "events": [
                    {"name": "go", "src": "a", "dst": "b"},
                    {"name": "go", "src": "a", "dst": "c"}
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(
            FsmBuilder::from_config(config.clone()).build(),
            Err(BuildError::ConflictingTransition { .. })
        ));

        let relaxed = MachineConfig {
            allow_overwrite: true,
            ..config
        };
        let fsm = FsmBuilder::from_config(relaxed).build().unwrap();
        fsm.event("go").unwrap();
        assert!(fsm.is("c"));
    }

    #[test]
    fn json_output_reparses() {
        let config = MachineConfig::from_json(DOOR).unwrap();
        let json = config.to_json().unwrap();

        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
