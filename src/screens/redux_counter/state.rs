use serde::{Deserialize, Serialize};

use crate::state::mvi::State;

/// State of the shared counter stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

impl State for CounterState {}
