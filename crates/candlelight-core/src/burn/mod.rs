mod engine;
mod hold;

pub use engine::{format_mmss, BurnState, BurnTimer, FULL_BURN_MS, TICK_INTERVAL_MS};
pub use hold::{HoldGesture, LONG_PRESS_MS};
