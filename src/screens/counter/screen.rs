use crate::state::{ReducerStore, StateError, Subscription};

use super::action::CounterAction;
use super::reducer::CounterReducer;
use super::state::Count;

/// Counter screen holding its own reducer store.
#[derive(Clone)]
pub struct CounterScreen {
    store: ReducerStore<CounterReducer>,
}

impl CounterScreen {
    pub fn new() -> Self {
        Self {
            store: ReducerStore::named("counter", 0),
        }
    }

    pub fn count(&self) -> Count {
        self.store.get()
    }

    pub fn increment(&self) -> Result<bool, StateError> {
        self.store.dispatch(CounterAction::Increment)
    }

    pub fn decrement(&self) -> Result<bool, StateError> {
        self.store.dispatch(CounterAction::Decrement)
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            "useReducer counter".to_string(),
            format!("Count: {}", self.count()),
        ]
    }
}

impl Default for CounterScreen {
    fn default() -> Self {
        Self::new()
    }
}
