use crate::state::mvi::Reducer;

use super::action::CounterAction;
use super::state::Count;

/// Reducer for the plain counter.
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = Count;
    type Action = CounterAction;

    fn reduce(state: Count, action: CounterAction) -> Count {
        match action {
            CounterAction::Increment => state + 1,
            CounterAction::Decrement => state - 1,
            CounterAction::Unknown => state,
        }
    }
}
