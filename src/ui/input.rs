use crate::digits::Direction;
use crate::ui::app::App;
use crate::ui::counter::CounterIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char(' ') => app.dispatch(CounterIntent::TogglePause),
        KeyCode::Up => app.dispatch(CounterIntent::SetDirection(Direction::Up)),
        KeyCode::Down => app.dispatch(CounterIntent::SetDirection(Direction::Down)),
        KeyCode::Char('r') | KeyCode::Char('R') => app.dispatch(CounterIntent::Reset),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut app = App::new(&Config::default());
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = App::new(&Config::default());
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn arrows_set_direction_and_space_pauses() {
        let mut app = App::new(&Config::default());
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert_eq!(app.counter().direction, Direction::Down);
        assert!(app.counter().paused);
        assert!(!app.should_quit());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = App::new(&Config::default());
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(!app.should_quit());
    }
}
