use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::screens::counter::CounterAction;
use crate::state::{SelectorSubscription, SharedStore, StateError};

use super::reducer::SharedCounterReducer;

/// Screen reading `count` from a shared store it does not own.
///
/// The store is injected by the composition root; the screen only holds a
/// selector subscription and counts how often that selection changed.
pub struct ReduxCounterScreen {
    store: SharedStore<SharedCounterReducer>,
    count: SelectorSubscription<i64>,
    renders: Arc<AtomicUsize>,
}

impl ReduxCounterScreen {
    pub fn new(store: SharedStore<SharedCounterReducer>) -> Self {
        let renders = Arc::new(AtomicUsize::new(0));
        let render_trigger = Arc::clone(&renders);
        let count = store.subscribe_with_selector(
            |state| state.count,
            move || {
                render_trigger.fetch_add(1, Ordering::SeqCst);
            },
        );
        Self {
            store,
            count,
            renders,
        }
    }

    pub fn count(&self) -> i64 {
        self.count.current()
    }

    /// Number of times the selected count changed since construction.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub fn dispatch(&self, action: CounterAction) -> Result<bool, StateError> {
        self.store.dispatch(action)
    }

    pub fn increment(&self) -> Result<bool, StateError> {
        self.dispatch(CounterAction::Increment)
    }

    pub fn decrement(&self) -> Result<bool, StateError> {
        self.dispatch(CounterAction::Decrement)
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            "Redux-style counter".to_string(),
            format!("Count: {}", self.count()),
        ]
    }
}
