//! Base trait for intents.

/// Marker trait for intent objects: user actions (key presses) and system
/// events (interval ticks) that a reducer turns into a new state.
pub trait Intent: Send + 'static {}
