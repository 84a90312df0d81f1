//! Text shown by the widget

use crate::state::{Phase, TimerState};

/// Split seconds into zero-padded `MM` and `SS` digits
pub fn format_clock(total_seconds: u32) -> (String, String) {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

/// Status line above the digits
pub fn status_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Alarming => "Time's Up",
        Phase::Running => "Running",
        Phase::Ready => "Ready",
        Phase::Standby => "Standby",
    }
}

/// What a tap will do right now
pub fn tap_hint(state: &TimerState) -> &'static str {
    if state.is_alarming { "Tap to Stop" } else { "Tap to Start" }
}
