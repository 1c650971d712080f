//! The read/subscribe surface every container shares, and the
//! equality-gated commit path behind `set` and `dispatch`.

use parking_lot::RwLock;

use super::error::StateError;
use super::notifier::{Notifier, Subscription};

/// A value holder that presentation code can read and observe.
///
/// `get()` always returns the value of the last completed commit.
pub trait Container: Send + Sync {
    type Value: Clone;

    fn get(&self) -> Self::Value;

    fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static;
}

/// Compute the next value from the current one and commit it if it differs.
///
/// `next` runs under the write lock, so it must not touch the same slot.
/// The lock is released before observers run. Returns `Ok(true)` when a new
/// value was stored.
pub(crate) fn commit_with<T, F>(
    slot: &RwLock<T>,
    notifier: &Notifier,
    next: F,
) -> Result<bool, StateError>
where
    T: PartialEq,
    F: FnOnce(&T) -> T,
{
    {
        let mut current = slot.write();
        let candidate = next(&*current);
        if *current == candidate {
            tracing::trace!(container = %notifier.label(), "Equal value, commit skipped");
            return Ok(false);
        }
        *current = candidate;
    }

    tracing::debug!(container = %notifier.label(), "Committed new value");
    notifier.notify()?;
    Ok(true)
}
