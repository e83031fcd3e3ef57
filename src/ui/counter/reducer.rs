//! Reducer for the counter driver.

use crate::digits::Direction;
use crate::ui::mvi::Reducer;

use super::intent::CounterIntent;
use super::state::CounterState;

/// Pure transitions. Triggering the engine with the pre-advance value is
/// the caller's job, done right before dispatching `Advance`.
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CounterIntent::Advance => {
                if !state.should_trigger() {
                    return state;
                }
                let value = match state.direction {
                    Direction::Up => state.value + 1,
                    Direction::Down => state.value - 1,
                };
                CounterState { value, ..state }
            }

            CounterIntent::TogglePause => CounterState {
                paused: !state.paused,
                ..state
            },

            CounterIntent::SetDirection(direction) => CounterState { direction, ..state },

            CounterIntent::Reset => CounterState {
                value: state.start,
                ..state
            },
        }
    }
}
