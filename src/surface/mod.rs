//! Rendering surface abstraction.
//!
//! The engine only ever talks to a surface through [`Surface`]. Handles for
//! columns and cards are owned by the engine; the surface never has to be
//! queried by label.
//!
//! - `memory.rs` - headless surface recording every operation
//! - `tui.rs` - terminal surface rendered with ratatui

pub mod memory;
pub mod tui;

pub use memory::{MemorySurface, SurfaceOp};
pub use tui::{FlipView, TuiSurface};

use crate::style::{StyleValue, ThemeVar};

/// Marker a card carries. The surface animates a flip from the `Next` face
/// onto the `Current` face of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CardState {
    #[default]
    Idle,
    Current,
    Next,
}

/// Capabilities the transition engine requires from a rendering surface.
pub trait Surface {
    /// Handle to a rendered column.
    type Column;
    /// Handle to a rendered card.
    type Card;

    /// Creates an empty column labeled with `place_value`.
    fn create_column(&mut self, place_value: u64) -> Self::Column;

    /// Destroys a column together with its cards.
    fn remove_column(&mut self, column: Self::Column);

    /// Creates the card showing `digit` inside `column`.
    fn create_card(&mut self, column: &Self::Column, digit: u8) -> Self::Card;

    fn set_card_state(&mut self, card: &Self::Card, state: CardState);

    /// Applies a visual variable scoped to this surface.
    fn apply_variable(&mut self, var: ThemeVar, value: &StyleValue);
}
