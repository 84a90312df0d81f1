//! Gesture recognition for the rotary dial
//!
//! Raw pointer contacts become a stream of [`Intent`]s: signed rotation
//! notches while dragging, a tap on a short press, a reset on a long press.

pub mod geometry;
pub mod recognizer;
pub mod session;

pub use geometry::{DialBounds, Point};
pub use recognizer::{GestureRecognizer, Intent, Motion};
pub use session::{ContactPhase, GestureSession};
