//! Haptic feedback sink

use std::time::Duration;

use tracing::debug;

/// Fire-and-forget vibration pulses
pub trait Haptics {
    fn pulse(&mut self, duration: Duration);
}

/// Haptics for hosts without a vibration motor: pulses are only traced
#[derive(Debug, Default)]
pub struct TracingHaptics;

impl Haptics for TracingHaptics {
    fn pulse(&mut self, duration: Duration) {
        debug!("Haptic pulse {}ms", duration.as_millis());
    }
}
