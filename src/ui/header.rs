use crate::ui::counter::CounterState;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_OK, STATUS_PAUSED,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// `shown` is the value on the cards, which trails `counter.value` by one step.
    pub fn widget(&self, counter: &CounterState, shown: i64) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status, status_color) = if counter.paused {
            ("paused", STATUS_PAUSED)
        } else if !counter.can_advance() {
            ("stopped", STATUS_PAUSED)
        } else {
            ("running", STATUS_OK)
        };
        let line = Line::from(vec![
            Span::styled(
                "  flipdeck",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("value {}", shown), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("counting {}", counter.direction.label()), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(status, Style::default().fg(status_color)),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
