//! Chronos Dial - a countdown timer driven by a rotary dial gesture
//!
//! Pointer contacts on a circular control are classified into rotation
//! notches, taps and long presses; those intents drive a countdown and alarm
//! state machine whose cadences are cancellable scheduled timers.

pub mod config;
pub mod display;
pub mod gesture;
pub mod input;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use gesture::{GestureRecognizer, Intent};
pub use state::{DialTimer, TimerState};
pub use tasks::run_dial_timer;
pub use utils::signals::shutdown_signal;
