//! Reactive state containers.
//!
//! Every screen holds its state in one of these containers:
//!
//! - [`Cell`]: one value with an equality-gated setter
//! - [`ReducerStore`]: state changed only by dispatching actions through a
//!   pure [`Reducer`](mvi::Reducer)
//! - [`SharedStore`]: a reducer store observed through per-consumer
//!   selectors
//! - [`ScopedProvider`]: a container's value published to a scope
//!
//! All of them notify through [`Notifier`], which delivers synchronously in
//! registration order and refuses re-entrant delivery cycles.

mod cell;
mod container;
mod error;
pub mod mvi;
mod notifier;
mod reducer_store;
mod scoped;
mod shared_store;

pub use cell::{Cell, Identity};
pub use container::Container;
pub use error::StateError;
pub use notifier::{Notifier, Observer, ObserverId, Subscription};
pub use reducer_store::ReducerStore;
pub use scoped::{active_scopes, provide, use_scoped, ScopedProvider};
pub use shared_store::{SelectorSubscription, SharedStore};
