//! Presentation mapping
//!
//! Everything here is a pure function of the timer state and the dial's
//! cosmetic rotation.

pub mod frame;
pub mod render;

pub use frame::{DialView, DisplayFrame};
pub use render::{format_clock, status_label, tap_hint};
