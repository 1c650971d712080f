//! Counter backed by an explicitly constructed shared store, read through
//! a selector.

mod reducer;
mod screen;
mod state;

pub use reducer::SharedCounterReducer;
pub use screen::ReduxCounterScreen;
pub use state::CounterState;
