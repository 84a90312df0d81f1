//! Serializable render output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::render::{format_clock, status_label, tap_hint};
use crate::{
    gesture::Intent,
    state::{Phase, TimerState},
};

/// Cosmetic dial state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DialView {
    /// Sum of raw angle deltas since start, independent of notch quantization
    pub rotation_degrees: f64,
    /// Highlighted while running or alarming
    pub lit: bool,
    /// A contact is pressing or dragging
    pub pressed: bool,
}

/// One rendered frame of the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub minutes: String,
    pub seconds: String,
    pub status: String,
    pub tap_hint: String,
    pub phase: Phase,
    pub timer: TimerState,
    pub dial: DialView,
    pub last_intent: Option<Intent>,
    pub last_intent_time: Option<DateTime<Utc>>,
}

impl DisplayFrame {
    pub fn render(
        timer: &TimerState,
        dial: DialView,
        last_intent: Option<Intent>,
        last_intent_time: Option<DateTime<Utc>>,
    ) -> Self {
        let (minutes, seconds) = format_clock(timer.remaining_seconds);
        let phase = timer.phase();

        Self {
            minutes,
            seconds,
            status: status_label(phase).to_string(),
            tap_hint: tap_hint(timer).to_string(),
            phase,
            timer: *timer,
            dial,
            last_intent,
            last_intent_time,
        }
    }
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self::render(&TimerState::new(), DialView::default(), None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_frame_is_standby() {
        let frame = DisplayFrame::default();
        assert_eq!(frame.minutes, "00");
        assert_eq!(frame.seconds, "00");
        assert_eq!(frame.status, "Standby");
        assert_eq!(frame.phase, Phase::Standby);
        assert!(!frame.dial.lit);
    }

    #[test]
    fn frame_serializes_as_flat_json() {
        let timer = TimerState { remaining_seconds: 95, is_active: true, is_alarming: false };
        let dial = DialView { rotation_degrees: 42.5, lit: true, pressed: false };
        let frame = DisplayFrame::render(&timer, dial, Some(Intent::Rotate(10)), None);

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["minutes"], "01");
        assert_eq!(json["seconds"], "35");
        assert_eq!(json["status"], "Running");
        assert_eq!(json["phase"], "running");
        assert_eq!(json["timer"]["remaining_seconds"], 95);
        assert_eq!(json["dial"]["rotation_degrees"], 42.5);
        assert_eq!(json["last_intent"]["intent"], "rotate");
        assert_eq!(json["last_intent"]["seconds"], 10);
    }
}
