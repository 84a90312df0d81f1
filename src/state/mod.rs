//! State management module
//!
//! This module contains the countdown state machine and the controller that
//! drives it from gestures and timer cadences.

pub mod dial_timer;
pub mod timer_state;

// Re-export main types
pub use dial_timer::DialTimer;
pub use timer_state::{Phase, TickOutcome, TimerState};
