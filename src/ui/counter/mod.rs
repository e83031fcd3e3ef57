//! Counter driver feature module.
//!
//! Decides what value to pass to the engine and when. Uses MVI:
//! - `state.rs` - value, direction, pause flag
//! - `intent.rs` - Advance, TogglePause, SetDirection, Reset
//! - `reducer.rs` - state transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::CounterIntent;
pub use reducer::CounterReducer;
pub use state::CounterState;
