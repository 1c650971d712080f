//! Single mutable value with an equality-gated setter.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

use super::container::{commit_with, Container};
use super::error::StateError;
use super::notifier::{Notifier, Subscription};

struct CellInner<T> {
    value: RwLock<T>,
    notifier: Notifier,
}

/// Local state: one value, a setter, and its observers.
///
/// Cloning a `Cell` creates a new handle to the **same** value.
pub struct Cell<T> {
    inner: Arc<CellInner<T>>,
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Cell<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self::named("cell", value)
    }

    /// Create a cell whose label shows up in logs and cycle errors.
    pub fn named(label: impl Into<String>, value: T) -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: RwLock::new(value),
                notifier: Notifier::new(label),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.value.read())
    }

    /// Store `value` and notify observers, unless it equals the current
    /// value. Returns whether anything changed.
    ///
    /// Called from one of this cell's own observers, the value is stored but
    /// nobody is told and the call returns [`StateError::NotificationCycle`].
    /// Observers later in the outer delivery then read the new value, while
    /// the ones already called have only seen the previous one.
    pub fn set(&self, value: T) -> Result<bool, StateError> {
        commit_with(&self.inner.value, &self.inner.notifier, move |_| value)
    }

    /// Derive the next value from the current one.
    ///
    /// `f` runs while the cell is locked and must not access this cell.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> Result<bool, StateError> {
        commit_with(&self.inner.value, &self.inner.notifier, f)
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
}

impl<T> Container for Cell<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Value = T;

    fn get(&self) -> T {
        Cell::get(self)
    }

    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        Cell::subscribe(self, observer)
    }
}

impl<T: fmt::Debug> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("label", &self.inner.notifier.label())
            .field("value", &*self.inner.value.read())
            .finish()
    }
}

/// Wrapper comparing payloads by pointer instead of by value.
///
/// For payloads without a meaningful `PartialEq`: two `Identity` values are
/// equal only when they share the same allocation.
pub struct Identity<T: ?Sized>(Arc<T>);

impl<T> Identity<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T: ?Sized> From<Arc<T>> for Identity<T> {
    fn from(value: Arc<T>) -> Self {
        Self(value)
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for Identity<T> {}

impl<T: ?Sized> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&&*self.0).finish()
    }
}
