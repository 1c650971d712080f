//! Model-View-Intent primitives behind the reducer-driven containers.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Observers ──→ View
//!    ↑                                           │
//!    └───────────────────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot held by a store
//! - **Action**: a user interaction or system event
//! - **Reducer**: pure function producing the next state

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::State;
