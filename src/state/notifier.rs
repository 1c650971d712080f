//! Observer registration and synchronous change delivery.
//!
//! Every container owns one [`Notifier`]. Observers are plain callbacks with
//! no payload; they pull the new value from the container when invoked.
//!
//! # Invariants
//!
//! 1. Observers are called in registration order.
//! 2. `notify()` delivers to the observers registered when it started.
//!    Subscribing or unsubscribing from inside an observer only affects the
//!    next delivery.
//! 3. No lock is held while observers run.
//! 4. A container that notifies again while its own delivery is still on the
//!    stack of the current thread gets [`StateError::NotificationCycle`]
//!    instead of recursing.

use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::error::StateError;

/// Callback invoked after a container commits a new value.
pub type Observer = Arc<dyn Fn() + Send + Sync>;

static NEXT_NOTIFIER_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    /// Notifiers currently delivering on this thread, outermost first.
    static DELIVERY_CHAIN: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Identity of one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct NotifierInner {
    id: u64,
    label: String,
    observers: Mutex<Vec<(ObserverId, Observer)>>,
    next_observer: AtomicU64,
}

impl NotifierInner {
    fn remove(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }
}

/// Publish/subscribe primitive shared by all containers.
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    /// Create a notifier; `label` identifies the owning container in logs
    /// and errors.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                id: NEXT_NOTIFIER_ID.fetch_add(1, Ordering::Relaxed),
                label: label.into(),
                observers: Mutex::new(Vec::new()),
                next_observer: AtomicU64::new(1),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Register an observer. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = ObserverId(self.inner.next_observer.fetch_add(1, Ordering::Relaxed));
        self.inner.observers.lock().push((id, Arc::new(observer)));
        Subscription {
            notifier: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.observers.lock().len()
    }

    /// Deliver a notification to a snapshot of the current observers.
    ///
    /// Returns the number of observers called.
    pub fn notify(&self) -> Result<usize, StateError> {
        let id = self.inner.id;
        let reentered = DELIVERY_CHAIN.with(|chain| {
            let mut chain = chain.borrow_mut();
            if chain.contains(&id) {
                true
            } else {
                chain.push(id);
                false
            }
        });

        if reentered {
            tracing::warn!(
                container = %self.inner.label,
                "Notification cycle detected, nested delivery skipped"
            );
            return Err(StateError::NotificationCycle {
                container: self.inner.label.clone(),
            });
        }

        // Pop this notifier from the chain even if an observer panics.
        let _chain_guard = scopeguard::guard(id, |id| {
            DELIVERY_CHAIN.with(|chain| {
                let mut chain = chain.borrow_mut();
                if let Some(pos) = chain.iter().rposition(|entry| *entry == id) {
                    chain.remove(pos);
                }
            });
        });

        let snapshot: Vec<Observer> = self
            .inner
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        tracing::trace!(
            container = %self.inner.label,
            observers = snapshot.len(),
            "Delivering notification"
        );

        for observer in &snapshot {
            observer();
        }

        Ok(snapshot.len())
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("label", &self.inner.label)
            .field("observers", &self.subscriber_count())
            .finish()
    }
}

/// Registration handle returned by `subscribe`.
///
/// Dropping it unregisters the observer.
#[must_use = "dropping a Subscription unregisters its observer"]
pub struct Subscription {
    notifier: Weak<NotifierInner>,
    id: ObserverId,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Unregister now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.notifier.upgrade() {
            inner.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
