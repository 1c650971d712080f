//! Server-derived async state.

mod cache;
mod entry;
mod key;

pub use cache::{FetchFn, FetchFuture, ResourceCache};
pub use entry::{ResourceEntry, ResourceStatus};
pub use key::ResourceKey;
