use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use ratatui::widgets::Clear;
use ratatui::Frame;
use std::time::Instant;

pub fn draw(frame: &mut Frame<'_>, app: &App, now: Instant) {
    let (header, body, footer) = layout_regions(frame.area());

    frame.render_widget(Header::new().widget(app.counter(), app.shown_value()), header);
    frame.render_widget(Clear, body);
    frame.render_widget(app.surface().view(now), body);
    frame.render_widget(Footer::new(app.interval()).widget(footer), footer);
}
