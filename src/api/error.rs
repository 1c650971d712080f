use thiserror::Error;

use crate::state::StateError;

/// Failure of one user fetch.
///
/// Stored inside resource entries, so it carries messages rather than the
/// underlying `reqwest` errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {message}")]
    Client { message: String },

    /// The request never produced a response.
    #[error("Request to '{url}' failed: {message}")]
    Request { url: String, message: String },

    /// The request exceeded the configured timeout.
    #[error("Request to '{url}' timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// The server answered with a non-success status.
    #[error("Failed to fetch user: server returned {status}")]
    Status { status: u16 },

    /// The response body was not a valid user record.
    #[error("Failed to decode user: {message}")]
    Decode { message: String },

    /// The fetch task died before producing a response.
    #[error("Failed to fetch user: {0}")]
    Aborted(#[from] StateError),
}
