use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::Duration;

/// Key, then what it does.
const KEYS: [(&str, &str); 4] = [
    ("Space", "pause"),
    ("↑/↓", "direction"),
    ("R", "reset"),
    ("Q", "quit"),
];

pub struct Footer {
    interval: Duration,
}

impl Footer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let key_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let mut spans = Vec::with_capacity(KEYS.len() * 3 + 2);
        for (index, (key, label)) in KEYS.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" · ", separator_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {label}"), label_style));
        }

        let tick = format!("every {}ms ", self.interval.as_millis());
        let used: usize = spans.iter().map(|s| s.width()).sum::<usize>() + tick.chars().count();
        // Inside the borders; the tick label is dropped when it would not fit.
        let inner = usize::from(area.width.saturating_sub(2));
        if used < inner {
            spans.insert(0, Span::raw(" "));
            spans.push(Span::raw(" ".repeat(inner - used - 1)));
            spans.push(Span::styled(tick, label_style.add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::widgets::Widget;

    fn row_text(width: u16) -> String {
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        Footer::new(Duration::from_millis(250))
            .widget(area)
            .render(area, &mut buf);
        (0..width).map(|x| buf[(x, 1)].symbol().to_string()).collect()
    }

    #[test]
    fn wide_footer_shows_keys_and_interval() {
        let text = row_text(80);
        assert!(text.contains("Space pause"));
        assert!(text.contains("Q quit"));
        assert!(text.trim_end_matches('│').trim_end().ends_with("every 250ms"));
    }

    #[test]
    fn narrow_footer_drops_interval() {
        let text = row_text(40);
        assert!(text.contains("Space pause"));
        assert!(!text.contains("every"));
    }
}
