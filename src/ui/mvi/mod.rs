//! Model-View-Intent (MVI) primitives for the counter driver.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ trigger / draw
//!    ↑                                  │
//!    └──────────────────────────────────┘
//! ```
//!
//! - **State**: what the driver knows about the counter
//! - **Intent**: key presses and timer ticks
//! - **Reducer**: pure function producing the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
