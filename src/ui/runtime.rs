use crate::config::Config;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use signal_hook::consts::{SIGINT, SIGTERM};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Redraw cadence; fast enough for the flip to look continuous.
const FRAME_RATE: Duration = Duration::from_millis(33);

pub fn run(config: Config) -> anyhow::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown))?;
    signal_hook::flag::register(SIGINT, Arc::clone(&shutdown))?;

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(&config);
    let events = EventHandler::new(FRAME_RATE, shutdown);
    tracing::info!(
        start = config.counter.start,
        interval_ms = config.counter.interval_ms,
        "Counter running"
    );

    let result: anyhow::Result<()> = loop {
        terminal.draw(|frame| draw(frame, &app, Instant::now()))?;
        if app.should_quit() {
            break Ok(());
        }

        match events.next(FRAME_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => {
                if let Err(err) = app.on_tick(Instant::now()) {
                    tracing::error!(error = %err, value = app.counter().value, "Trigger failed");
                    break Err(err.into());
                }
            }
            // The next draw picks up the new size.
            Ok(AppEvent::Resize(cols, rows)) => tracing::debug!(cols, rows, "Resized"),
            Ok(AppEvent::Shutdown) => app.request_quit(),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break Ok(()),
        }
    };

    drop(guard);
    tracing::info!(value = app.counter().value, "Counter stopped");
    result
}
