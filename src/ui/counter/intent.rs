//! Intents for the counter driver.

use crate::digits::Direction;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    /// Interval elapsed: step the value one unit in the current direction.
    Advance,

    TogglePause,

    SetDirection(Direction),

    /// Return to the start value.
    Reset,
}

impl Intent for CounterIntent {}
