//! Misuse errors raised by the state containers.

use thiserror::Error;

/// Errors surfaced to presentation code by the containers and the cache.
///
/// Apart from `FetchAborted`, each one means the caller is wired wrongly.
/// None of them are recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// `use_scoped` was called with no enclosing provider for the type.
    #[error("No enclosing provider for '{type_name}'")]
    MissingProvider { type_name: &'static str },

    /// A container tried to notify its own observers while already
    /// delivering a notification on the same thread.
    #[error("Notification cycle detected in container '{container}'")]
    NotificationCycle { container: String },

    /// `refetch` was called for a key the cache has never fetched.
    #[error("No fetcher registered for resource '{key}'")]
    UnknownResource { key: String },

    /// The resource cache was built outside of a tokio runtime.
    #[error("No tokio runtime available to run fetches")]
    NoRuntime,

    /// A fetch task panicked or was cancelled before producing a result.
    /// Stored in the entry's error slot, converted into the cache's error
    /// type.
    #[error("Fetch for '{key}' aborted: {reason}")]
    FetchAborted { key: String, reason: String },
}

/// Lets caches with plain string errors record aborted fetches.
impl From<StateError> for String {
    fn from(err: StateError) -> Self {
        err.to_string()
    }
}
