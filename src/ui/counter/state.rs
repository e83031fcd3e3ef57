//! State for the counter driver.

use crate::digits::Direction;
use crate::ui::mvi::UiState;

/// The driver's view of the counter. The engine never stores the value;
/// this is the only copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
    pub start: i64,
    pub direction: Direction,
    pub paused: bool,
}

impl UiState for CounterState {}

impl CounterState {
    pub fn new(start: i64, direction: Direction) -> Self {
        Self {
            value: start,
            start,
            direction,
            paused: false,
        }
    }

    /// Whether one more step is possible. Counting down stops at zero and
    /// counting up stops at `i64::MAX`.
    pub fn can_advance(&self) -> bool {
        match self.direction {
            Direction::Up => self.value < i64::MAX,
            Direction::Down => self.value > 0,
        }
    }

    /// Whether the next interval should flip the surface.
    pub fn should_trigger(&self) -> bool {
        !self.paused && self.can_advance()
    }
}
