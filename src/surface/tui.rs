//! Terminal surface: keeps the column/card tree and draws it with ratatui.
//!
//! A column whose cards are marked `Next` and `Current` plays a two-phase
//! flip, each phase lasting the theme's animation duration:
//!
//! ```text
//!   phase 1: upper half of `next` folds down, revealing `current` behind it
//!   phase 2: lower half of `current` unfolds over the lower half of `next`
//! ```
//!
//! Re-marking a column with a different pair restarts its flip from the
//! beginning. Re-marking it with the pair it already shows is a no-op.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::{CardState, Surface};
use crate::style::{Axis, StyleValue, Theme, ThemeColor, ThemeVar, Viewport};

/// 3x5 bitmaps, one row per entry, most significant of the low three bits
/// on the left.
const GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];
const GLYPH_COLS: u16 = 3;
const GLYPH_ROWS: u16 = 5;
/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: u16 = 2;
const INK: char = '█';
const COLUMN_GAP: u16 = 1;
/// Brightness kept by a half that is mid-fold.
const FOLD_SHADE: u8 = 0xb0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiColumn {
    id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiCard {
    column: u64,
    digit: u8,
}

/// What a column shows at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnFrame {
    Static(u8),
    /// `progress` runs from 0 to 2; the phase boundary is at 1.
    Flip { from: u8, to: u8, progress: f32 },
}

#[derive(Debug)]
struct ColumnModel {
    id: u64,
    place_value: u64,
    cards: BTreeMap<u8, CardState>,
    top: Option<u8>,
    /// `(current, next)` of the flip last started.
    last_pair: Option<(u8, u8)>,
    flip_started: Option<Instant>,
}

impl ColumnModel {
    fn marked(&self, state: CardState) -> Option<u8> {
        self.cards
            .iter()
            .find(|(_, s)| **s == state)
            .map(|(digit, _)| *digit)
    }

    fn frame(&self, now: Instant, duration: Duration) -> ColumnFrame {
        let current = self.marked(CardState::Current);
        let next = self.marked(CardState::Next);
        match (current, next, self.flip_started) {
            (Some(to), Some(from), Some(started)) => {
                let elapsed = now.saturating_duration_since(started);
                let total = duration.checked_mul(2).unwrap_or(Duration::MAX);
                if duration.is_zero() || elapsed >= total {
                    ColumnFrame::Static(to)
                } else {
                    ColumnFrame::Flip {
                        from,
                        to,
                        progress: elapsed.as_secs_f32() / duration.as_secs_f32(),
                    }
                }
            }
            (Some(to), _, _) => ColumnFrame::Static(to),
            _ => ColumnFrame::Static(self.top.unwrap_or(0)),
        }
    }

    /// Starts a flip once both markers are set, unless this pair is already
    /// the one on display.
    fn restart_if_changed(&mut self, now: Instant) {
        let pair = match (self.marked(CardState::Current), self.marked(CardState::Next)) {
            (Some(current), Some(next)) => (current, next),
            _ => return,
        };
        if self.last_pair != Some(pair) {
            self.last_pair = Some(pair);
            self.flip_started = Some(now);
        }
    }
}

#[derive(Debug)]
pub struct TuiSurface {
    next_id: u64,
    columns: Vec<ColumnModel>,
    theme: Theme,
}

impl Default for TuiSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiSurface {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            columns: Vec::new(),
            theme: Theme::default(),
        }
    }

    /// Theme as assembled from applied variables.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn frame(&self, place_value: u64, now: Instant) -> Option<ColumnFrame> {
        self.columns
            .iter()
            .find(|c| c.place_value == place_value)
            .map(|c| c.frame(now, self.theme.animation_duration))
    }

    pub fn flip_started(&self, place_value: u64) -> Option<Instant> {
        self.columns
            .iter()
            .find(|c| c.place_value == place_value)
            .and_then(|c| c.flip_started)
    }

    /// Whether any column is mid-flip at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        let duration = self.theme.animation_duration;
        self.columns
            .iter()
            .any(|c| matches!(c.frame(now, duration), ColumnFrame::Flip { .. }))
    }

    /// Widget drawing the surface as it looks at `now`.
    pub fn view(&self, now: Instant) -> FlipView<'_> {
        FlipView { surface: self, now }
    }

    fn column_mut(&mut self, id: u64) -> Option<&mut ColumnModel> {
        self.columns.iter_mut().find(|c| c.id == id)
    }
}

impl Surface for TuiSurface {
    type Column = TuiColumn;
    type Card = TuiCard;

    fn create_column(&mut self, place_value: u64) -> TuiColumn {
        let id = self.next_id;
        self.next_id += 1;
        self.columns.push(ColumnModel {
            id,
            place_value,
            cards: BTreeMap::new(),
            top: None,
            last_pair: None,
            flip_started: None,
        });
        TuiColumn { id }
    }

    fn remove_column(&mut self, column: TuiColumn) {
        self.columns.retain(|c| c.id != column.id);
    }

    fn create_card(&mut self, column: &TuiColumn, digit: u8) -> TuiCard {
        match self.column_mut(column.id) {
            Some(model) => {
                model.cards.insert(digit, CardState::Idle);
                model.top = Some(digit);
            }
            None => tracing::warn!(column = column.id, digit, "Card created on removed column"),
        }
        TuiCard {
            column: column.id,
            digit,
        }
    }

    fn set_card_state(&mut self, card: &TuiCard, state: CardState) {
        let Some(model) = self.column_mut(card.column) else {
            tracing::warn!(column = card.column, digit = card.digit, "Card state set on removed column");
            return;
        };
        if let Some(slot) = model.cards.get_mut(&card.digit) {
            *slot = state;
        }
        if state != CardState::Idle {
            model.restart_if_changed(Instant::now());
        }
    }

    fn apply_variable(&mut self, var: ThemeVar, value: &StyleValue) {
        if !self.theme.set(var, *value) {
            tracing::warn!(var = var.name(), %value, "Ignoring variable of the wrong kind");
        }
    }
}

/// Widget returned by [`TuiSurface::view`].
pub struct FlipView<'a> {
    surface: &'a TuiSurface,
    now: Instant,
}

/// Card dimensions in cells after fitting into the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CardLayout {
    width: u16,
    height: u16,
    scale: u16,
    corner: bool,
}

impl CardLayout {
    fn fit(theme: &Theme, area: Rect, columns: u16) -> Option<Self> {
        if columns == 0 {
            return None;
        }
        let viewport = Viewport {
            width: area.width,
            height: area.height,
        };
        let gaps = COLUMN_GAP * (columns - 1);
        let max_width = area.width.saturating_sub(gaps) / columns;
        let width = theme
            .card_width
            .to_cells(Axis::Horizontal, viewport)
            .min(max_width);
        let height = theme
            .card_height
            .to_cells(Axis::Vertical, viewport)
            .min(area.height);
        if width == 0 || height < 2 {
            return None;
        }

        let font_rows = theme.card_font_size.to_cells(Axis::Vertical, viewport);
        let scale = (font_rows / GLYPH_ROWS)
            .max(1)
            .min(height / GLYPH_ROWS)
            .min(width / (GLYPH_COLS * CELL_ASPECT));
        let corner = theme
            .card_border_radius
            .to_cells(Axis::Horizontal, viewport)
            > 0
            && width > 2;

        Some(Self {
            width,
            height,
            scale,
            corner,
        })
    }
}

/// Ink map for one card face: `Some(symbol)` cells are drawn in the number color.
fn face(digit: u8, layout: CardLayout) -> Vec<Vec<Option<char>>> {
    let CardLayout {
        width,
        height,
        scale,
        ..
    } = layout;
    let mut rows = vec![vec![None; usize::from(width)]; usize::from(height)];

    if scale == 0 {
        let x = usize::from(width / 2);
        let y = usize::from(height / 2);
        rows[y][x] = char::from_digit(u32::from(digit), 10);
        return rows;
    }

    let glyph = GLYPHS[usize::from(digit % 10)];
    let glyph_width = GLYPH_COLS * CELL_ASPECT * scale;
    let glyph_height = GLYPH_ROWS * scale;
    let left = (width - glyph_width) / 2;
    let top = (height - glyph_height) / 2;
    for y in 0..glyph_height {
        let bits = glyph[usize::from(y / scale)];
        for x in 0..glyph_width {
            let column = x / (CELL_ASPECT * scale);
            if bits >> (GLYPH_COLS - 1 - column) & 1 == 1 {
                rows[usize::from(top + y)][usize::from(left + x)] = Some(INK);
            }
        }
    }
    rows
}

/// One composed row: ink per cell plus whether the row belongs to a half
/// that is currently folding.
struct ComposedRow {
    cells: Vec<Option<char>>,
    folding: bool,
}

fn compose(frame: ColumnFrame, layout: CardLayout) -> Vec<ComposedRow> {
    let height = usize::from(layout.height);
    let half = height / 2;
    let lower = height - half;

    let (from, to, progress) = match frame {
        ColumnFrame::Static(digit) => {
            return face(digit, layout)
                .into_iter()
                .map(|cells| ComposedRow {
                    cells,
                    folding: false,
                })
                .collect();
        }
        ColumnFrame::Flip { from, to, progress } => (face(from, layout), face(to, layout), progress),
    };

    let mut rows: Vec<ComposedRow> = Vec::with_capacity(height);
    if progress < 1.0 {
        // Upper: `to` behind, `from` folding down towards the center line.
        let visible = ((1.0 - progress) * half as f32).round() as usize;
        for y in 0..half {
            let folded_from = half - visible;
            if y >= folded_from && visible > 0 {
                let source = (y - folded_from) * half / visible;
                rows.push(ComposedRow {
                    cells: from[source].clone(),
                    folding: true,
                });
            } else {
                rows.push(ComposedRow {
                    cells: to[y].clone(),
                    folding: false,
                });
            }
        }
        for row in from.iter().skip(half) {
            rows.push(ComposedRow {
                cells: row.clone(),
                folding: false,
            });
        }
    } else {
        // Lower: `from` behind, `to` unfolding down from the center line.
        let visible = ((progress - 1.0).min(1.0) * lower as f32).round() as usize;
        for row in to.iter().take(half) {
            rows.push(ComposedRow {
                cells: row.clone(),
                folding: false,
            });
        }
        for offset in 0..lower {
            if offset < visible {
                let source = half + offset * lower / visible;
                rows.push(ComposedRow {
                    cells: to[source].clone(),
                    folding: true,
                });
            } else {
                rows.push(ComposedRow {
                    cells: from[half + offset].clone(),
                    folding: false,
                });
            }
        }
    }
    rows
}

fn to_color(color: ThemeColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

impl Widget for FlipView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let surface = self.surface;
        let theme = &surface.theme;
        let count = u16::try_from(surface.columns.len()).unwrap_or(u16::MAX);
        let Some(layout) = CardLayout::fit(theme, area, count) else {
            return;
        };

        let background = theme.number_bg_color.blend_over(ThemeColor::BLACK);
        let ink = to_color(theme.number_color.blend_over(background));
        let shaded = to_color(
            ThemeColor::rgba(0, 0, 0, 0xff - FOLD_SHADE)
                .blend_over(theme.number_color.blend_over(background)),
        );
        let line_color = to_color(theme.center_line_color.blend_over(background));
        let draw_line = theme.center_line_height.magnitude() > 0.0;

        let total_width = layout.width * count + COLUMN_GAP * count.saturating_sub(1);
        let left = area.x + area.width.saturating_sub(total_width) / 2;
        let top = area.y + area.height.saturating_sub(layout.height) / 2;

        let mut ordered: Vec<&ColumnModel> = surface.columns.iter().collect();
        ordered.sort_by(|a, b| b.place_value.cmp(&a.place_value));

        for (index, column) in ordered.into_iter().enumerate() {
            let x0 = left + (layout.width + COLUMN_GAP) * index as u16;
            let frame = column.frame(self.now, theme.animation_duration);
            let rows = compose(frame, layout);
            let center = layout.height / 2;

            for (dy, row) in rows.iter().enumerate() {
                let dy = dy as u16;
                for (dx, cell) in row.cells.iter().enumerate() {
                    let dx = dx as u16;
                    let is_corner = layout.corner
                        && (dx == 0 || dx == layout.width - 1)
                        && (dy == 0 || dy == layout.height - 1);
                    if is_corner {
                        continue;
                    }
                    let Some(target) = buf.cell_mut((x0 + dx, top + dy)) else {
                        continue;
                    };
                    target.set_bg(to_color(background));
                    match cell {
                        Some(symbol) => {
                            target.set_char(*symbol);
                            target.set_fg(if row.folding { shaded } else { ink });
                        }
                        None if draw_line && dy == center => {
                            target.set_char('─');
                            target.set_fg(line_color);
                        }
                        None => {
                            target.set_char(' ');
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::Direction;
    use crate::engine::{FlipCounter, TriggerOptions};
    use crate::style::Dimension;

    fn small_theme() -> Theme {
        Theme {
            card_width: Dimension::Px(160.0),
            card_height: Dimension::Px(280.0),
            card_font_size: Dimension::Px(200.0),
            card_border_radius: Dimension::Px(0.0),
            animation_duration: Duration::from_millis(100),
            ..Theme::default()
        }
    }

    fn render(surface: &TuiSurface, now: Instant, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        surface.view(now).render(area, &mut buf);
        buf
    }

    fn ink_count(buf: &Buffer) -> usize {
        buf.content().iter().filter(|c| c.symbol() == "█").count()
    }

    #[test]
    fn applied_variables_update_theme() {
        let counter = FlipCounter::initialize(TuiSurface::new(), 0, &small_theme());
        assert_eq!(counter.surface().theme(), &small_theme());
    }

    #[test]
    fn unmarked_column_shows_top_card() {
        let counter = FlipCounter::initialize(TuiSurface::new(), 5, &small_theme());
        let frame = counter.surface().frame(1, Instant::now());
        assert_eq!(frame, Some(ColumnFrame::Static(0)));
    }

    #[test]
    fn flip_progresses_then_settles_on_current() {
        let mut counter = FlipCounter::initialize(TuiSurface::new(), 3, &small_theme());
        counter.trigger(3, TriggerOptions::new(Direction::Up)).unwrap();
        let surface = counter.surface();
        let started = surface.flip_started(1).unwrap();

        match surface.frame(1, started + Duration::from_millis(50)) {
            Some(ColumnFrame::Flip { from, to, progress }) => {
                assert_eq!((from, to), (2, 3));
                assert!((progress - 0.5).abs() < 0.01);
            }
            other => panic!("Expected flip, got {other:?}"),
        }
        assert!(surface.is_animating(started + Duration::from_millis(150)));
        assert_eq!(
            surface.frame(1, started + Duration::from_millis(200)),
            Some(ColumnFrame::Static(3))
        );
        assert!(!surface.is_animating(started + Duration::from_secs(1)));
    }

    #[test]
    fn unchanged_column_does_not_replay_its_flip() {
        let mut counter = FlipCounter::initialize(TuiSurface::new(), 10, &small_theme());
        counter.trigger(10, TriggerOptions::default()).unwrap();
        let tens_started = counter.surface().flip_started(10).unwrap();
        let ones_started = counter.surface().flip_started(1).unwrap();

        // Let the first flip (2 x 100ms) finish.
        std::thread::sleep(Duration::from_millis(250));
        counter.trigger(11, TriggerOptions::default()).unwrap();
        let surface = counter.surface();

        assert_eq!(surface.flip_started(10), Some(tens_started));
        assert!(surface.flip_started(1).unwrap() > ones_started);
        let later = surface.flip_started(1).unwrap() + Duration::from_millis(20);
        assert_eq!(surface.frame(10, later), Some(ColumnFrame::Static(1)));
        assert!(matches!(
            surface.frame(1, later),
            Some(ColumnFrame::Flip { from: 0, to: 1, .. })
        ));
    }

    #[test]
    fn huge_duration_keeps_flipping_without_overflow() {
        let mut counter = FlipCounter::initialize(TuiSurface::new(), 4, &small_theme());
        counter.surface_mut().apply_variable(
            ThemeVar::AnimationDuration,
            &StyleValue::Duration(Duration::from_secs(u64::MAX / 2 + 1)),
        );
        counter.trigger(4, TriggerOptions::default()).unwrap();
        let started = counter.surface().flip_started(1).unwrap();

        assert!(matches!(
            counter.surface().frame(1, started + Duration::from_secs(60)),
            Some(ColumnFrame::Flip { from: 3, to: 4, .. })
        ));
    }

    #[test]
    fn renders_glyph_ink_for_each_column() {
        let mut counter = FlipCounter::initialize(TuiSurface::new(), 18, &small_theme());
        counter.trigger(18, TriggerOptions::default()).unwrap();
        let later = Instant::now() + Duration::from_secs(1);
        let buf = render(counter.surface(), later, 40, 12);

        // "1" has 8 lit glyph pixels, "8" has 13; each pixel is 2 cells wide.
        assert_eq!(ink_count(&buf), (8 + 13) * 2);
    }

    #[test]
    fn most_significant_column_is_leftmost() {
        let mut counter = FlipCounter::initialize(TuiSurface::new(), 10, &small_theme());
        counter.trigger(10, TriggerOptions::default()).unwrap();
        let later = Instant::now() + Duration::from_secs(1);
        let buf = render(counter.surface(), later, 40, 12);

        // Layout: two 8-wide cards plus one gap, centered in 40 columns.
        let left: u16 = (40 - 17) / 2;
        // Card top, glyph offset inside the card, then the second glyph row.
        let row: u16 = (12 - 7) / 2 + 1 + 1;
        // Second glyph row of "1" is 0b110: first pixel lit.
        assert_eq!(buf[(left + 1, row)].symbol(), "█");
        // Second glyph row of "0" is 0b101: middle pixel dark.
        assert_eq!(buf[(left + 8 + 1 + 1 + 2, row)].symbol(), " ");
    }

    #[test]
    fn too_small_area_draws_nothing() {
        let counter = FlipCounter::initialize(TuiSurface::new(), 0, &small_theme());
        let buf = render(counter.surface(), Instant::now(), 10, 1);
        assert_eq!(ink_count(&buf), 0);
    }

    #[test]
    fn mid_flip_shows_parts_of_both_faces() {
        let layout = CardLayout {
            width: 8,
            height: 8,
            scale: 1,
            corner: false,
        };
        let rows = compose(
            ColumnFrame::Flip {
                from: 1,
                to: 7,
                progress: 1.5,
            },
            layout,
        );
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().take(4).all(|r| !r.folding));
        assert!(rows.iter().skip(4).take(2).all(|r| r.folding));
        assert!(rows.iter().skip(6).all(|r| !r.folding));
    }

    #[test]
    fn tiny_cards_fall_back_to_plain_digit() {
        let layout = CardLayout {
            width: 3,
            height: 2,
            scale: 0,
            corner: false,
        };
        let rows = face(7, layout);
        assert_eq!(rows[1][1], Some('7'));
    }
}
