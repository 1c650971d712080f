//! The screen catalogue. Each screen is a thin call site over one kind of
//! state container.

pub mod counter;
pub mod redux_counter;
pub mod theme;
pub mod todo;
pub mod user;
pub mod zustand_counter;

pub use counter::CounterScreen;
pub use redux_counter::ReduxCounterScreen;
pub use theme::ThemeScreen;
pub use todo::{TodoItem, TodoScreen};
pub use user::{UserScreen, UserView};
pub use zustand_counter::{CounterStore, ZustandCounterScreen};
