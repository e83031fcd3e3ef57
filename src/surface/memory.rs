//! Headless surface that keeps the column/card tree in memory.

use std::collections::BTreeMap;

use super::{CardState, Surface};
use crate::style::{StyleValue, ThemeVar};

/// One recorded surface call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    CreateColumn { place_value: u64 },
    RemoveColumn { place_value: u64 },
    CreateCard { place_value: u64, digit: u8 },
    SetCardState { place_value: u64, digit: u8, state: CardState },
    ApplyVariable { var: ThemeVar, value: StyleValue },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryColumn {
    id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCard {
    column: u64,
    digit: u8,
}

#[derive(Debug, Clone)]
struct ColumnNode {
    id: u64,
    place_value: u64,
    cards: BTreeMap<u8, CardState>,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u64,
    columns: Vec<ColumnNode>,
    variables: BTreeMap<&'static str, StyleValue>,
    ops: Vec<SurfaceOp>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Place values of all live columns, ascending.
    pub fn place_values(&self) -> Vec<u64> {
        let mut places: Vec<u64> = self.columns.iter().map(|c| c.place_value).collect();
        places.sort_unstable();
        places
    }

    /// Digits of the cards in the column for `place_value`, ascending.
    pub fn card_digits(&self, place_value: u64) -> Option<Vec<u8>> {
        self.node(place_value)
            .map(|node| node.cards.keys().copied().collect())
    }

    pub fn card_state(&self, place_value: u64, digit: u8) -> Option<CardState> {
        self.node(place_value)
            .and_then(|node| node.cards.get(&digit).copied())
    }

    /// Digit carrying `state` in the column for `place_value`, if exactly one does.
    pub fn marked(&self, place_value: u64, state: CardState) -> Option<u8> {
        let node = self.node(place_value)?;
        let mut marked = node
            .cards
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(digit, _)| *digit);
        let first = marked.next()?;
        marked.next().is_none().then_some(first)
    }

    pub fn variable(&self, var: ThemeVar) -> Option<&StyleValue> {
        self.variables.get(var.name())
    }

    /// How many `ApplyVariable` calls were made for `var`.
    pub fn variable_applications(&self, var: ThemeVar) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::ApplyVariable { var: v, .. } if *v == var))
            .count()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn node(&self, place_value: u64) -> Option<&ColumnNode> {
        self.columns.iter().find(|c| c.place_value == place_value)
    }

    fn node_by_id(&mut self, id: u64) -> Option<&mut ColumnNode> {
        self.columns.iter_mut().find(|c| c.id == id)
    }
}

impl Surface for MemorySurface {
    type Column = MemoryColumn;
    type Card = MemoryCard;

    fn create_column(&mut self, place_value: u64) -> MemoryColumn {
        let id = self.next_id;
        self.next_id += 1;
        self.columns.push(ColumnNode {
            id,
            place_value,
            cards: BTreeMap::new(),
        });
        self.ops.push(SurfaceOp::CreateColumn { place_value });
        MemoryColumn { id }
    }

    fn remove_column(&mut self, column: MemoryColumn) {
        if let Some(index) = self.columns.iter().position(|c| c.id == column.id) {
            let node = self.columns.remove(index);
            self.ops.push(SurfaceOp::RemoveColumn {
                place_value: node.place_value,
            });
        }
    }

    fn create_card(&mut self, column: &MemoryColumn, digit: u8) -> MemoryCard {
        if let Some(node) = self.node_by_id(column.id) {
            node.cards.insert(digit, CardState::Idle);
            let place_value = node.place_value;
            self.ops.push(SurfaceOp::CreateCard { place_value, digit });
        }
        MemoryCard {
            column: column.id,
            digit,
        }
    }

    fn set_card_state(&mut self, card: &MemoryCard, state: CardState) {
        if let Some(node) = self.node_by_id(card.column) {
            if let Some(slot) = node.cards.get_mut(&card.digit) {
                *slot = state;
                let place_value = node.place_value;
                self.ops.push(SurfaceOp::SetCardState {
                    place_value,
                    digit: card.digit,
                    state,
                });
            }
        }
    }

    fn apply_variable(&mut self, var: ThemeVar, value: &StyleValue) {
        self.variables.insert(var.name(), *value);
        self.ops.push(SurfaceOp::ApplyVariable { var, value: *value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_cards_per_column() {
        let mut surface = MemorySurface::new();
        let column = surface.create_column(10);
        let card = surface.create_card(&column, 4);
        surface.set_card_state(&card, CardState::Next);

        assert_eq!(surface.place_values(), vec![10]);
        assert_eq!(surface.card_digits(10), Some(vec![4]));
        assert_eq!(surface.marked(10, CardState::Next), Some(4));
        assert_eq!(surface.marked(10, CardState::Current), None);
    }

    #[test]
    fn removing_column_drops_its_cards() {
        let mut surface = MemorySurface::new();
        let column = surface.create_column(1);
        surface.create_card(&column, 0);
        surface.remove_column(column);

        assert_eq!(surface.column_count(), 0);
        assert_eq!(surface.card_digits(1), None);
        assert_eq!(
            surface.ops().last(),
            Some(&SurfaceOp::RemoveColumn { place_value: 1 })
        );
    }
}
