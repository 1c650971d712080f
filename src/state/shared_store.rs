//! One reducer store consumed by many independent call sites.
//!
//! Each consumer subscribes through a selector and keeps its own copy of
//! the last slice it was shown. On every store change the selector is
//! re-run and the consumer is called back only if its slice differs, so
//! unrelated state changes never reach it.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::container::Container;
use super::error::StateError;
use super::mvi::Reducer;
use super::notifier::Subscription;
use super::reducer_store::ReducerStore;

/// Store shared by several consumers, each observing a derived slice.
///
/// Constructed explicitly by a composition root and handed to consumers;
/// cloning gives another handle to the same store.
pub struct SharedStore<R: Reducer> {
    store: ReducerStore<R>,
}

impl<R: Reducer> Clone for SharedStore<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<R: Reducer> SharedStore<R> {
    pub fn new(initial: R::State) -> Self {
        Self::named("shared-store", initial)
    }

    pub fn named(label: impl Into<String>, initial: R::State) -> Self {
        Self {
            store: ReducerStore::named(label, initial),
        }
    }

    pub fn from_store(store: ReducerStore<R>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> R::State {
        self.store.get()
    }

    /// Evaluate `selector` against the current state.
    pub fn select<V>(&self, selector: impl FnOnce(&R::State) -> V) -> V {
        self.store.with(selector)
    }

    pub fn dispatch(&self, action: R::Action) -> Result<bool, StateError> {
        self.store.dispatch(action)
    }

    /// Observe every committed change of the whole state.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.store.subscribe(observer)
    }

    /// Observe one slice of the state.
    ///
    /// `observer` runs only when `selector(state)` differs from the value
    /// last delivered to this subscription. The slice at subscription time
    /// counts as delivered.
    pub fn subscribe_with_selector<V, S, F>(
        &self,
        selector: S,
        observer: F,
    ) -> SelectorSubscription<V>
    where
        V: Clone + PartialEq + Send + 'static,
        S: Fn(&R::State) -> V + Send + Sync + 'static,
        F: Fn() + Send + Sync + 'static,
    {
        let last = Arc::new(Mutex::new(self.store.with(&selector)));
        let store = self.store.downgrade();
        let last_seen = Arc::clone(&last);

        let subscription = self.store.subscribe(move || {
            let Some(store) = store.upgrade() else {
                return;
            };
            let next = store.with(&selector);
            let changed = {
                let mut last = last_seen.lock();
                if *last == next {
                    false
                } else {
                    *last = next;
                    true
                }
            };
            if changed {
                observer();
            }
        });

        SelectorSubscription { subscription, last }
    }

    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }
}

impl<R: Reducer> Container for SharedStore<R> {
    type Value = R::State;

    fn get(&self) -> R::State {
        SharedStore::get(self)
    }

    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        SharedStore::subscribe(self, observer)
    }
}

impl<R: Reducer> fmt::Debug for SharedStore<R>
where
    R::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStore")
            .field("store", &self.store)
            .finish()
    }
}

/// Selector registration with its last delivered slice.
///
/// Dropping it unregisters the observer.
#[must_use = "dropping a SelectorSubscription unregisters its observer"]
pub struct SelectorSubscription<V> {
    subscription: Subscription,
    last: Arc<Mutex<V>>,
}

impl<V: Clone> SelectorSubscription<V> {
    /// The slice most recently delivered to this subscriber.
    pub fn current(&self) -> V {
        self.last.lock().clone()
    }

    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}

impl<V: fmt::Debug> fmt::Debug for SelectorSubscription<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorSubscription")
            .field("id", &self.subscription.id())
            .field("last", &*self.last.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::mvi::{Action, State};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Board {
        score: i32,
        title: String,
    }

    impl State for Board {}

    enum BoardAction {
        Score(i32),
        Rename(String),
    }

    impl Action for BoardAction {}

    struct BoardReducer;

    impl Reducer for BoardReducer {
        type State = Board;
        type Action = BoardAction;

        fn reduce(state: Board, action: BoardAction) -> Board {
            match action {
                BoardAction::Score(points) => Board {
                    score: state.score + points,
                    ..state
                },
                BoardAction::Rename(title) => Board { title, ..state },
            }
        }
    }

    #[test]
    fn each_selector_runs_once_per_change() {
        let store = SharedStore::<BoardReducer>::new(Board::default());
        let evaluations = Arc::new(AtomicUsize::new(0));

        let subs: Vec<_> = (0..3)
            .map(|_| {
                let evaluations = Arc::clone(&evaluations);
                store.subscribe_with_selector(
                    move |board: &Board| {
                        evaluations.fetch_add(1, Ordering::SeqCst);
                        board.score
                    },
                    || {},
                )
            })
            .collect();

        // Initial slice is computed once per subscription.
        assert_eq!(evaluations.load(Ordering::SeqCst), 3);

        store.dispatch(BoardAction::Score(1)).unwrap();
        assert_eq!(evaluations.load(Ordering::SeqCst), 6);

        // Equal state: the store never notifies, no selector runs.
        store.dispatch(BoardAction::Score(0)).unwrap();
        assert_eq!(evaluations.load(Ordering::SeqCst), 6);
        drop(subs);
    }

    #[test]
    fn dropped_selector_subscription_stops_evaluating() {
        let store = SharedStore::<BoardReducer>::new(Board::default());
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let sub = store.subscribe_with_selector(
            |board: &Board| board.title.clone(),
            move || {
                hits_clone.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert_eq!(store.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);
        store
            .dispatch(BoardAction::Rename("renamed".to_string()))
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
