//! HTTP client for the user endpoint behind the query screen.

mod client;
mod error;
mod types;

pub use client::UserClient;
pub use error::FetchError;
pub use types::User;
