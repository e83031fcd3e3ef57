use crate::config::Config;
use crate::engine::{FlipCounter, TriggerOptions};
use crate::error::FlipError;
use crate::surface::TuiSurface;
use crate::ui::counter::{CounterIntent, CounterReducer, CounterState};
use crate::ui::mvi::Reducer;
use std::time::{Duration, Instant};

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    /// Driver state (MVI pattern).
    counter: CounterState,
    /// Flip engine bound to the terminal surface.
    engine: FlipCounter<TuiSurface>,
    /// Value the cards settle on: the one last handed to the engine.
    shown: i64,
    interval: Duration,
    last_advance: Instant,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Instant::now())
    }

    /// Builds the app as if it started at `now`.
    pub fn with_clock(config: &Config, now: Instant) -> Self {
        let counter = CounterState::new(config.counter.start, config.counter.direction);
        let engine = FlipCounter::initialize(TuiSurface::new(), counter.value, &config.theme());
        Self {
            should_quit: false,
            counter,
            engine,
            shown: counter.value,
            interval: Duration::from_millis(config.counter.interval_ms),
            last_advance: now,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn counter(&self) -> &CounterState {
        &self.counter
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn shown_value(&self) -> i64 {
        self.shown
    }

    pub fn surface(&self) -> &TuiSurface {
        self.engine.surface()
    }

    pub fn dispatch(&mut self, intent: CounterIntent) {
        dispatch_mvi!(self, counter, CounterReducer, intent);
    }

    /// Advances the counter once per elapsed interval.
    pub fn on_tick(&mut self, now: Instant) -> Result<(), FlipError> {
        if now.saturating_duration_since(self.last_advance) < self.interval {
            return Ok(());
        }
        self.last_advance = now;
        self.advance()
    }

    /// Flips the surface for the current value, then steps the value.
    ///
    /// The engine is handed the pre-advance value; it animates from the
    /// neighbouring digit onto that value.
    pub fn advance(&mut self) -> Result<(), FlipError> {
        if !self.counter.should_trigger() {
            return Ok(());
        }
        let options = TriggerOptions::new(self.counter.direction);
        self.engine.trigger(self.counter.value, options)?;
        self.shown = self.counter.value;
        self.dispatch(CounterIntent::Advance);
        Ok(())
    }
}
