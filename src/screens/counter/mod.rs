//! Counter driven by a local reducer store.

mod action;
mod reducer;
mod screen;
mod state;

pub use action::CounterAction;
pub use reducer::CounterReducer;
pub use screen::CounterScreen;
pub use state::Count;
