//! Keyed async resource cache.
//!
//! Each key moves through `absent -> pending -> success | error`, and back
//! to `pending` on refetch. At most one fetch per key is in flight: a
//! `request` for a pending key returns the pending entry instead of
//! starting another fetch.
//!
//! Every fetch the cache starts is stamped with a generation. A completion
//! only commits if the entry still carries its generation, so a fetch that
//! was superseded by `invalidate` or a newer fetch finishes without effect.
//! The underlying future is never cancelled.
//!
//! A fetch that panics or is cancelled still settles its entry: the error
//! slot gets a [`StateError::FetchAborted`] converted into `E`.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinError;

use crate::state::{Notifier, StateError, Subscription};

use super::entry::{ResourceEntry, ResourceStatus};

/// Future produced by a fetch function.
pub type FetchFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Externally supplied operation performing the actual I/O.
pub type FetchFn<T, E> = Arc<dyn Fn() -> FetchFuture<T, E> + Send + Sync>;

struct Slot<T, E> {
    entry: ResourceEntry<T, E>,
    generation: u64,
}

struct CacheState<K, T, E> {
    entries: HashMap<K, Slot<T, E>>,
    fetchers: HashMap<K, FetchFn<T, E>>,
    notifiers: HashMap<K, Arc<Notifier>>,
    next_generation: u64,
}

struct CacheShared<K, T, E> {
    state: Mutex<CacheState<K, T, E>>,
    runtime: Handle,
    /// Bumped on every entry change; lets `settled` wait without polling.
    revision: watch::Sender<u64>,
}

/// Cache of async results keyed by resource identity.
///
/// Cloning gives another handle to the same cache.
pub struct ResourceCache<K, T, E> {
    shared: Arc<CacheShared<K, T, E>>,
}

impl<K, T, E> Clone for ResourceCache<K, T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, T, E> ResourceCache<K, T, E>
where
    K: Clone + Eq + Hash + fmt::Display + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + From<StateError> + 'static,
{
    /// Create a cache whose fetches run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(CacheShared {
                state: Mutex::new(CacheState {
                    entries: HashMap::new(),
                    fetchers: HashMap::new(),
                    notifiers: HashMap::new(),
                    next_generation: 0,
                }),
                runtime,
                revision,
            }),
        }
    }

    /// Create a cache bound to the runtime the caller is running on.
    pub fn current() -> Result<Self, StateError> {
        let runtime = Handle::try_current().map_err(|_| StateError::NoRuntime)?;
        Ok(Self::new(runtime))
    }

    /// Current entry for `key`, or `None` when the key is absent.
    pub fn entry(&self, key: &K) -> Option<ResourceEntry<T, E>> {
        self.shared
            .state
            .lock()
            .entries
            .get(key)
            .map(|slot| slot.entry.clone())
    }

    pub fn status(&self, key: &K) -> Option<ResourceStatus> {
        self.shared
            .state
            .lock()
            .entries
            .get(key)
            .map(|slot| slot.entry.status)
    }

    /// Ask for `key`, starting `fetch` unless a fetch for it is in flight.
    ///
    /// Returns immediately with the entry as it stands after the call:
    /// pending, with stale data from a previous success when there is one.
    /// Fetch failures never surface here; they land in the entry.
    pub fn request<F, Fut>(&self, key: K, fetch: F) -> Result<ResourceEntry<T, E>, StateError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let fetcher: FetchFn<T, E> = Arc::new(move || Box::pin(fetch()) as FetchFuture<T, E>);
        self.start(key, Some(fetcher))
    }

    /// Re-run the last fetch used for `key`, even if it already settled.
    ///
    /// A pending key is left alone and its entry returned.
    pub fn refetch(&self, key: &K) -> Result<ResourceEntry<T, E>, StateError> {
        self.start(key.clone(), None)
    }

    /// Drop the entry for `key` so the next `request` starts fresh.
    ///
    /// A fetch still in flight for the key completes without effect.
    /// Returns whether an entry existed.
    pub fn invalidate(&self, key: &K) -> Result<bool, StateError> {
        let existed = self.shared.state.lock().entries.remove(key).is_some();
        if existed {
            tracing::debug!(key = %key, "Resource invalidated");
            self.announce(key)?;
        }
        Ok(existed)
    }

    /// Forget `key` entirely: its entry and the fetch function stored for
    /// refetching. Subscribers stay registered.
    pub fn evict(&self, key: &K) -> Result<bool, StateError> {
        let existed = {
            let mut state = self.shared.state.lock();
            state.fetchers.remove(key);
            if state
                .notifiers
                .get(key)
                .is_some_and(|notifier| notifier.subscriber_count() == 0)
            {
                state.notifiers.remove(key);
            }
            state.entries.remove(key).is_some()
        };
        if existed {
            tracing::debug!(key = %key, "Resource evicted");
            self.announce(key)?;
        }
        Ok(existed)
    }

    /// Observe every change to the entry for `key`.
    pub fn subscribe<F>(&self, key: &K, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let notifier = {
            let mut state = self.shared.state.lock();
            Arc::clone(
                state
                    .notifiers
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Notifier::new(format!("resource:{}", key)))),
            )
        };
        notifier.subscribe(observer)
    }

    /// Wait until `key` is no longer pending and return its entry.
    ///
    /// Returns `None` if the key is or becomes absent.
    pub async fn settled(&self, key: &K) -> Option<ResourceEntry<T, E>> {
        let mut revision = self.shared.revision.subscribe();
        loop {
            match self.entry(key) {
                Some(entry) if entry.is_pending() => {}
                other => return other,
            }
            if revision.changed().await.is_err() {
                return self.entry(key);
            }
        }
    }

    fn start(
        &self,
        key: K,
        new_fetcher: Option<FetchFn<T, E>>,
    ) -> Result<ResourceEntry<T, E>, StateError> {
        let (entry, fetcher, generation) = {
            let mut state = self.shared.state.lock();

            if let Some(slot) = state.entries.get(&key) {
                if slot.entry.is_pending() {
                    tracing::debug!(key = %key, "Fetch already in flight, request deduplicated");
                    return Ok(slot.entry.clone());
                }
            }

            if let Some(fetcher) = new_fetcher {
                state.fetchers.insert(key.clone(), fetcher);
            }
            let fetcher = state
                .fetchers
                .get(&key)
                .cloned()
                .ok_or_else(|| StateError::UnknownResource {
                    key: key.to_string(),
                })?;

            state.next_generation += 1;
            let generation = state.next_generation;

            let (stale_data, fetched_at) = match state.entries.get(&key) {
                Some(slot) => (slot.entry.data.clone(), slot.entry.fetched_at),
                None => (None, None),
            };
            let entry = ResourceEntry::pending(stale_data, fetched_at);
            state.entries.insert(
                key.clone(),
                Slot {
                    entry: entry.clone(),
                    generation,
                },
            );

            (entry, fetcher, generation)
        };

        tracing::debug!(key = %key, generation, "Fetch started");

        let cache = self.clone();
        let task_key = key.clone();
        let runtime = self.shared.runtime.clone();
        self.shared.runtime.spawn(async move {
            // The fetch runs as its own task so a panic surfaces here as a
            // `JoinError` instead of unwinding through the completion.
            let result = match runtime.spawn(async move { fetcher().await }).await {
                Ok(result) => result,
                Err(err) => {
                    let reason = abort_reason(err);
                    tracing::error!(key = %task_key, generation, %reason, "Fetch aborted");
                    Err(E::from(StateError::FetchAborted {
                        key: task_key.to_string(),
                        reason,
                    }))
                }
            };
            cache.complete(task_key, generation, result);
        });

        self.announce(&key)?;
        Ok(entry)
    }

    fn complete(&self, key: K, generation: u64, result: Result<T, E>) {
        let status = {
            let mut state = self.shared.state.lock();
            match state.entries.get_mut(&key) {
                Some(slot) if slot.generation == generation && slot.entry.is_pending() => {
                    slot.entry = ResourceEntry::settled(result);
                    Some(slot.entry.status)
                }
                _ => None,
            }
        };

        let Some(status) = status else {
            tracing::debug!(
                key = %key,
                generation,
                "Superseded fetch completed, result discarded"
            );
            return;
        };

        tracing::info!(key = %key, ?status, "Fetch settled");

        if let Err(err) = self.announce(&key) {
            tracing::warn!(key = %key, error = %err, "Failed to notify resource subscribers");
        }
    }

    /// Wake `settled` waiters and notify the key's subscribers.
    ///
    /// A key whose subscribers have all gone loses its notifier here.
    fn announce(&self, key: &K) -> Result<(), StateError> {
        self.shared.revision.send_modify(|revision| *revision += 1);
        let notifier = {
            let mut state = self.shared.state.lock();
            let idle = state
                .notifiers
                .get(key)
                .is_some_and(|notifier| notifier.subscriber_count() == 0);
            if idle {
                state.notifiers.remove(key);
            }
            state.notifiers.get(key).cloned()
        };
        if let Some(notifier) = notifier {
            notifier.notify()?;
        }
        Ok(())
    }

    /// Number of keys holding a subscriber registry.
    pub fn observed_keys(&self) -> usize {
        self.shared.state.lock().notifiers.len()
    }
}

fn abort_reason(err: JoinError) -> String {
    if !err.is_panic() {
        return "fetch task was cancelled".to_string();
    }
    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("fetch panicked: {}", message)
}

impl<K, T, E> fmt::Debug for ResourceCache<K, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("ResourceCache")
            .field("entries", &state.entries.len())
            .field("fetchers", &state.fetchers.len())
            .finish()
    }
}
