//! External collaborators of the timer
//!
//! The tone generator and haptic sink sit outside the core logic; the
//! controller only triggers them.

pub mod haptics;
pub mod tone;

pub use haptics::{Haptics, TracingHaptics};
pub use tone::{default_tone_factory, LazyTone, TerminalBell, ToneError, ToneGenerator};
