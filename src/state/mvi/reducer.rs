//! Reducer trait for reducer-driven stores.

use super::action::Action;
use super::state::State;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State. It has no access
/// to the store it runs in, so it cannot dispatch further actions.
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action and return the new state.
    ///
    /// Actions that do not apply to the current state return it unchanged.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
