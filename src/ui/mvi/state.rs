//! Base trait for driver state.

/// Marker trait for state objects. Cheap to clone and comparable so the
/// caller can tell whether an intent changed anything.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
