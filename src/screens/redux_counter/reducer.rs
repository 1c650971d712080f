use crate::screens::counter::CounterAction;
use crate::state::mvi::Reducer;

use super::state::CounterState;

/// Reducer for counter state held in a shared store.
pub struct SharedCounterReducer;

impl Reducer for SharedCounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(state: CounterState, action: CounterAction) -> CounterState {
        match action {
            CounterAction::Increment => CounterState {
                count: state.count + 1,
            },
            CounterAction::Decrement => CounterState {
                count: state.count - 1,
            },
            CounterAction::Unknown => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_and_decrement() {
        let state = SharedCounterReducer::reduce(CounterState::default(), CounterAction::Increment);
        assert_eq!(state.count, 1);
        let state = SharedCounterReducer::reduce(state, CounterAction::Decrement);
        assert_eq!(state.count, 0);
    }

    #[test]
    fn unknown_returns_same_state() {
        let state = CounterState { count: 9 };
        assert_eq!(
            SharedCounterReducer::reduce(state.clone(), CounterAction::Unknown),
            state
        );
    }
}
