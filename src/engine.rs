//! Transition engine: keeps the surface's columns in step with the value and
//! marks the current/next card pair of every column on each trigger.
//!
//! The engine owns every column and card handle it creates. A column for
//! place value 10^(k-1) sits at rendering index k, and columns always form a
//! contiguous run starting at the ones place.

use std::collections::BTreeMap;

use crate::digits::{self, DigitPosition, Direction};
use crate::error::FlipError;
use crate::style::Theme;
use crate::surface::{CardState, Surface};

/// Options for a single [`FlipCounter::trigger`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerOptions {
    pub direction: Direction,
}

impl TriggerOptions {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

struct Column<S: Surface> {
    handle: S::Column,
    cards: BTreeMap<u8, S::Card>,
}

pub struct FlipCounter<S: Surface> {
    surface: S,
    theme: Theme,
    columns: BTreeMap<u64, Column<S>>,
    configured: bool,
}

impl<S: Surface> FlipCounter<S> {
    /// Builds the columns for `initial_value` on `surface` and applies `theme`
    /// once the ones column exists.
    pub fn initialize(surface: S, initial_value: i64, theme: &Theme) -> Self {
        tracing::info!(initial_value, "Initializing flip counter");
        let mut counter = Self {
            surface,
            theme: *theme,
            columns: BTreeMap::new(),
            configured: false,
        };
        counter.ensure_columns(initial_value);
        counter
    }

    /// Flips every column to show `value`.
    ///
    /// `value` is the pre-advance value: each column animates from
    /// `next_value(digit, direction)` onto `digit`. Calling this while a
    /// previous flip is still playing resets the markers immediately.
    pub fn trigger(&mut self, value: i64, options: TriggerOptions) -> Result<(), FlipError> {
        tracing::debug!(value, direction = options.direction.label(), "Trigger");
        let targets = digits::decompose(value);

        self.reconcile(targets.len());

        // Resolve everything before touching markers so a failure cannot
        // leave a column half-marked.
        let mut plan = Vec::with_capacity(targets.len());
        for DigitPosition { place_value, value: digit } in targets {
            let next = digits::next_value(digit, options.direction)?;
            plan.push((place_value, digit, next));
        }

        for (place_value, current, next) in plan {
            self.mark(place_value, current, next)?;
        }
        Ok(())
    }

    /// Converts the engine into a bare trigger closure.
    pub fn into_trigger(mut self) -> impl FnMut(i64, TriggerOptions) -> Result<(), FlipError> {
        move |value, options| self.trigger(value, options)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether the theme has been applied to the surface.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Place values of the rendered columns, ascending.
    pub fn place_values(&self) -> Vec<u64> {
        self.columns.keys().copied().collect()
    }

    fn reconcile(&mut self, target_count: usize) {
        let existing = self.columns.len();
        if target_count > existing {
            for index in existing + 1..=target_count {
                let seed = digits::place_value_at(index);
                // Place values never exceed 10^18 for an i64 magnitude.
                self.ensure_columns(seed as i64);
            }
        } else {
            while self.columns.len() > target_count {
                if let Some((place_value, column)) = self.columns.pop_last() {
                    tracing::debug!(place_value, "Removing column");
                    self.surface.remove_column(column.handle);
                }
            }
        }
    }

    /// Creates columns for every position of `value` that has none yet.
    fn ensure_columns(&mut self, value: i64) {
        let mut ones_created = false;
        for position in digits::decompose(value) {
            if self.columns.contains_key(&position.place_value) {
                continue;
            }
            self.create_column(position.place_value);
            if position.place_value == 1 {
                ones_created = true;
            }
        }

        if ones_created && !self.configured {
            self.apply_theme();
        }
    }

    fn create_column(&mut self, place_value: u64) {
        tracing::debug!(place_value, "Creating column");
        let handle = self.surface.create_column(place_value);
        let mut cards = BTreeMap::new();
        // Highest first so that 0 ends up on top of an unmarked stack.
        for digit in (0..=9u8).rev() {
            let card = self.surface.create_card(&handle, digit);
            cards.insert(digit, card);
        }
        self.columns.insert(place_value, Column { handle, cards });
    }

    fn apply_theme(&mut self) {
        tracing::debug!("Applying theme to surface");
        for (var, value) in self.theme.variables() {
            self.surface.apply_variable(var, &value);
        }
        self.configured = true;
    }

    fn mark(&mut self, place_value: u64, current: u8, next: u8) -> Result<(), FlipError> {
        let column = self
            .columns
            .get(&place_value)
            .ok_or(FlipError::ColumnNotFound { place_value })?;
        let card = |digit: u8| {
            column
                .cards
                .get(&digit)
                .ok_or(FlipError::CardNotFound { place_value, digit })
        };
        let current_card = card(current)?;
        let next_card = card(next)?;

        for card in column.cards.values() {
            self.surface.set_card_state(card, CardState::Idle);
        }
        self.surface.set_card_state(current_card, CardState::Current);
        self.surface.set_card_state(next_card, CardState::Next);
        tracing::trace!(place_value, current, next, "Marked column");
        Ok(())
    }
}
