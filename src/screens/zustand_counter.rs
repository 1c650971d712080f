//! Counter store with bound actions, consumed through selector hooks.
//!
//! Instead of dispatching actions, consumers call `increment()` and
//! `decrement()` on the store handle itself. Each consumer picks the slice
//! it renders with [`CounterStore::use_count`].

use crate::screens::counter::CounterAction;
use crate::screens::redux_counter::{CounterState, SharedCounterReducer};
use crate::state::{SelectorSubscription, SharedStore, StateError};

/// Shared counter with its actions bound to the handle.
#[derive(Clone)]
pub struct CounterStore {
    store: SharedStore<SharedCounterReducer>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self {
            store: SharedStore::named("zustand-counter", CounterState::default()),
        }
    }

    pub fn count(&self) -> i64 {
        self.store.select(|state| state.count)
    }

    pub fn increment(&self) -> Result<bool, StateError> {
        self.store.dispatch(CounterAction::Increment)
    }

    pub fn decrement(&self) -> Result<bool, StateError> {
        self.store.dispatch(CounterAction::Decrement)
    }

    /// Subscribe to `count`; `observer` runs only when it changes.
    pub fn use_count<F>(&self, observer: F) -> SelectorSubscription<i64>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.store
            .subscribe_with_selector(|state: &CounterState| state.count, observer)
    }
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen rendering the zustand-style counter.
pub struct ZustandCounterScreen {
    store: CounterStore,
    count: SelectorSubscription<i64>,
}

impl ZustandCounterScreen {
    pub fn new(store: CounterStore) -> Self {
        let count = store.use_count(|| tracing::trace!("zustand counter changed"));
        Self { store, count }
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    pub fn count(&self) -> i64 {
        self.count.current()
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            "Zustand-style counter".to_string(),
            format!("Count: {}", self.count()),
        ]
    }
}
