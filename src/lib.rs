//! Flip-clock style digit counter.
//!
//! [`digits`] decomposes numbers into per-column digits, [`engine`] keeps a
//! [`surface::Surface`] in step with the value and marks the cards each
//! column flips between, and [`ui`] drives the whole thing in a terminal.

pub mod cli;
pub mod config;
pub mod digits;
pub mod engine;
pub mod error;
pub mod logging;
pub mod style;
pub mod surface;
pub mod ui;

pub use digits::{decompose, decompose_f64, next_value, DigitPosition, Direction};
pub use engine::{FlipCounter, TriggerOptions};
pub use error::FlipError;
pub use style::{FlipOptions, Theme};
