//! Reducer-driven container: state changes only through `dispatch`.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::container::{commit_with, Container};
use super::error::StateError;
use super::mvi::Reducer;
use super::notifier::{Notifier, Subscription};

struct StoreInner<S> {
    state: RwLock<S>,
    notifier: Notifier,
}

/// Container whose transitions are computed by a pure [`Reducer`].
///
/// Cloning a `ReducerStore` creates a new handle to the **same** state.
pub struct ReducerStore<R: Reducer> {
    inner: Arc<StoreInner<R::State>>,
}

impl<R: Reducer> Clone for ReducerStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> ReducerStore<R> {
    pub fn new(initial: R::State) -> Self {
        Self::named("store", initial)
    }

    pub fn named(label: impl Into<String>, initial: R::State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(initial),
                notifier: Notifier::new(label),
            }),
        }
    }

    pub fn label(&self) -> &str {
        self.inner.notifier.label()
    }

    pub fn get(&self) -> R::State {
        self.inner.state.read().clone()
    }

    /// Borrow the current state without cloning it.
    pub fn with<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&*self.inner.state.read())
    }

    /// Run the reducer on the current state and commit the result.
    ///
    /// The reducer runs under the store's write lock, so concurrent
    /// dispatches are applied one after another. Returns whether the state
    /// changed; an unchanged state notifies nobody.
    ///
    /// A dispatch from inside this store's own observer still commits, but
    /// returns [`StateError::NotificationCycle`] without notifying. Observers
    /// that ran before it are left one state behind until the next dispatch.
    pub fn dispatch(&self, action: R::Action) -> Result<bool, StateError> {
        commit_with(&self.inner.state, &self.inner.notifier, move |current| {
            R::reduce(current.clone(), action)
        })
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe(observer)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.notifier.subscriber_count()
    }

    /// Handle that does not keep the store alive; used by observers that
    /// read back from the store they are registered on.
    pub(crate) fn downgrade(&self) -> WeakReducerStore<R> {
        WeakReducerStore {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

pub(crate) struct WeakReducerStore<R: Reducer> {
    inner: Weak<StoreInner<R::State>>,
}

impl<R: Reducer> WeakReducerStore<R> {
    pub(crate) fn upgrade(&self) -> Option<ReducerStore<R>> {
        self.inner.upgrade().map(|inner| ReducerStore { inner })
    }
}

impl<R: Reducer> Default for ReducerStore<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: Reducer> Container for ReducerStore<R> {
    type Value = R::State;

    fn get(&self) -> R::State {
        ReducerStore::get(self)
    }

    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        ReducerStore::subscribe(self, observer)
    }
}

impl<R: Reducer> fmt::Debug for ReducerStore<R>
where
    R::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerStore")
            .field("label", &self.label())
            .field("state", &*self.inner.state.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::mvi::{Action, State};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Flags {
        armed: bool,
        fired: u32,
    }

    impl State for Flags {}

    enum FlagAction {
        Arm,
        Fire,
    }

    impl Action for FlagAction {}

    struct FlagReducer;

    impl Reducer for FlagReducer {
        type State = Flags;
        type Action = FlagAction;

        fn reduce(state: Flags, action: FlagAction) -> Flags {
            match action {
                FlagAction::Arm => Flags {
                    armed: true,
                    ..state
                },
                FlagAction::Fire if state.armed => Flags {
                    armed: false,
                    fired: state.fired + 1,
                },
                // Firing while disarmed does not apply.
                FlagAction::Fire => state,
            }
        }
    }

    #[test]
    fn default_store_starts_from_default_state() {
        let store = ReducerStore::<FlagReducer>::default();
        assert_eq!(store.get(), Flags::default());
    }

    #[test]
    fn inapplicable_action_is_a_noop() {
        let store = ReducerStore::<FlagReducer>::default();
        assert_eq!(store.dispatch(FlagAction::Fire), Ok(false));
        assert_eq!(store.get().fired, 0);
    }

    #[test]
    fn dispatch_applies_transitions_in_order() {
        let store = ReducerStore::<FlagReducer>::named("flags", Flags::default());
        assert_eq!(store.dispatch(FlagAction::Arm), Ok(true));
        assert_eq!(store.dispatch(FlagAction::Arm), Ok(false));
        assert_eq!(store.dispatch(FlagAction::Fire), Ok(true));
        assert_eq!(
            store.get(),
            Flags {
                armed: false,
                fired: 1
            }
        );
        assert!(store.with(|flags| !flags.armed));
    }
}
