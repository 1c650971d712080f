//! Actions shared by the counter screens.

use serde::{Deserialize, Serialize};

use crate::state::mvi::Action;

/// Actions understood by the counter reducers.
///
/// Deserialised from `{"type": "..."}`; any tag other than `increment` or
/// `decrement` becomes [`CounterAction::Unknown`], which reducers treat as
/// a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CounterAction {
    Increment,
    Decrement,
    #[serde(other)]
    Unknown,
}

impl Action for CounterAction {}

impl CounterAction {
    /// Parse a JSON array of actions.
    pub fn parse_script(json: &str) -> Result<Vec<CounterAction>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
