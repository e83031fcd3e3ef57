//! Digit model: positional decomposition and per-column stepping.
//!
//! Pure functions with no knowledge of the surface. The engine indexes
//! columns by [`DigitPosition::place_value`], so the order of the returned
//! positions carries no meaning for it.

use serde::{Deserialize, Serialize};

use crate::error::FlipError;

/// Largest representable place value for an `i64` magnitude.
pub const MAX_PLACE_VALUE: u64 = 1_000_000_000_000_000_000;

/// One decimal digit of a number together with its power-of-ten position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitPosition {
    /// Power of ten identifying the column (1, 10, 100, ...).
    pub place_value: u64,
    /// Digit shown in that column, always 0-9.
    pub value: u8,
}

/// Whether the displayed number is conceptually increasing or decreasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Splits `n` into one [`DigitPosition`] per decimal digit of `|n|`.
///
/// The sign is ignored. Zero yields a single ones-place entry. Positions are
/// returned most-significant first.
pub fn decompose(n: i64) -> Vec<DigitPosition> {
    let mut remaining = n.unsigned_abs();
    if remaining == 0 {
        return vec![DigitPosition {
            place_value: 1,
            value: 0,
        }];
    }

    let mut positions = Vec::with_capacity(digit_count(n));
    let mut place_value = 1u64;
    while remaining > 0 {
        positions.push(DigitPosition {
            place_value,
            value: (remaining % 10) as u8,
        });
        remaining /= 10;
        // |i64::MIN| has 19 digits, so 10^19 still fits in u64.
        place_value *= 10;
    }
    positions.reverse();
    positions
}

/// Checked variant of [`decompose`] for untyped numeric input.
///
/// Rejects NaN, infinities, fractional values and magnitudes outside `i64`.
pub fn decompose_f64(value: f64) -> Result<Vec<DigitPosition>, FlipError> {
    if !value.is_finite() {
        return Err(FlipError::invalid(format!("{value} is not a finite number")));
    }
    if value.fract() != 0.0 {
        return Err(FlipError::invalid(format!("{value} is not an integer")));
    }
    // 2^63 is exactly representable; i64::MAX is not.
    if value < i64::MIN as f64 || value >= 9_223_372_036_854_775_808.0 {
        return Err(FlipError::invalid(format!("{value} is out of range")));
    }
    Ok(decompose(value as i64))
}

/// Number of columns needed to render `n` (at least one).
pub fn digit_count(n: i64) -> usize {
    let mut remaining = n.unsigned_abs();
    let mut count = 1;
    while remaining >= 10 {
        remaining /= 10;
        count += 1;
    }
    count
}

/// Place value of the column at 1-based rendering index `index`.
pub fn place_value_at(index: usize) -> u64 {
    10u64.saturating_pow(index.saturating_sub(1) as u32)
}

/// Digit the wheel moves to from `current` when stepping in `direction`.
///
/// `Up` steps the wheel backwards and `Down` forwards. The surface flips from
/// the `next` face onto the `current` one, so this pairing is what makes an
/// increasing counter animate upwards.
pub fn next_value(current: u8, direction: Direction) -> Result<u8, FlipError> {
    if current > 9 {
        return Err(FlipError::invalid(format!(
            "digit {current} is outside 0-9"
        )));
    }

    Ok(match direction {
        Direction::Up => (current + 9) % 10,
        Direction::Down => (current + 1) % 10,
    })
}
