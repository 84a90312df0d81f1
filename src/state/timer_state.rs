//! Countdown timer state and its transitions

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Coarse phase of the timer, derived from [`TimerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing dialed in
    Standby,
    /// Duration set, not counting
    Ready,
    /// Counting down
    Running,
    /// Countdown reached zero and has not been dismissed
    Alarming,
}

/// Outcome of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed
    Idle,
    /// One second elapsed, countdown continues
    Counting(u32),
    /// Countdown expired and the alarm is now sounding
    Expired,
}

/// Countdown state: remaining duration plus activity and alarm flags.
///
/// `is_active` and `is_alarming` are never both set, and a zero duration is
/// never active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub is_active: bool,
    pub is_alarming: bool,
}

impl TimerState {
    /// Create a new timer in standby
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.is_alarming {
            Phase::Alarming
        } else if self.is_active {
            Phase::Running
        } else if self.remaining_seconds > 0 {
            Phase::Ready
        } else {
            Phase::Standby
        }
    }

    /// Add (or remove, for negative deltas) seconds. The duration is clamped
    /// at zero and any sounding alarm is dismissed.
    pub fn adjust_duration(&mut self, delta_seconds: i64) {
        let adjusted = i64::from(self.remaining_seconds)
            .saturating_add(delta_seconds)
            .clamp(0, i64::from(u32::MAX));
        self.remaining_seconds = adjusted as u32;
        self.is_alarming = false;

        if self.remaining_seconds == 0 && self.is_active {
            info!("Duration dialed down to zero, stopping countdown");
            self.is_active = false;
        }

        debug!("Adjusted duration by {}s, remaining={}s", delta_seconds, self.remaining_seconds);
    }

    /// Tap behaviour: dismiss the alarm, otherwise pause or start.
    pub fn toggle_activation(&mut self) {
        if self.is_alarming {
            info!("Alarm dismissed");
            self.is_alarming = false;
        } else if self.is_active {
            info!("Countdown paused at {}s", self.remaining_seconds);
            self.is_active = false;
        } else if self.remaining_seconds > 0 {
            info!("Countdown started with {}s", self.remaining_seconds);
            self.is_active = true;
        } else {
            debug!("Toggle ignored, no duration set");
        }
    }

    /// Return to standby from any phase
    pub fn reset(&mut self) {
        info!("Timer reset");
        *self = Self::new();
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active {
            return TickOutcome::Idle;
        }

        if self.remaining_seconds <= 1 {
            info!("Countdown expired, alarm raised");
            *self = Self {
                remaining_seconds: 0,
                is_active: false,
                is_alarming: true,
            };
            TickOutcome::Expired
        } else {
            self.remaining_seconds -= 1;
            TickOutcome::Counting(self.remaining_seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(remaining_seconds: u32, is_active: bool, is_alarming: bool) -> TimerState {
        TimerState { remaining_seconds, is_active, is_alarming }
    }

    #[test]
    fn adjust_never_goes_negative() {
        let mut timer = TimerState::new();
        for delta in [-10, 30, -50, 20, -1, 0, -1000] {
            timer.adjust_duration(delta);
        }
        assert_eq!(timer.remaining_seconds, 0);

        timer.adjust_duration(40);
        timer.adjust_duration(-15);
        assert_eq!(timer.remaining_seconds, 25);
    }

    #[test]
    fn adjust_saturates_at_extremes() {
        let mut timer = state(5, false, false);
        timer.adjust_duration(i64::MAX);
        assert_eq!(timer.remaining_seconds, u32::MAX);

        timer.adjust_duration(i64::MAX);
        assert_eq!(timer.remaining_seconds, u32::MAX);

        timer.adjust_duration(i64::MIN);
        assert_eq!(timer, state(0, false, false));
    }

    #[test]
    fn adjust_clears_alarm_even_with_zero_delta() {
        let mut timer = state(0, false, true);
        timer.adjust_duration(0);
        assert_eq!(timer, state(0, false, false));
    }

    #[test]
    fn adjust_keeps_activity() {
        let mut timer = state(30, true, false);
        timer.adjust_duration(10);
        assert_eq!(timer, state(40, true, false));

        let mut timer = state(30, false, false);
        timer.adjust_duration(10);
        assert_eq!(timer, state(40, false, false));
    }

    #[test]
    fn adjust_to_zero_stops_running_countdown() {
        let mut timer = state(20, true, false);
        timer.adjust_duration(-30);
        assert_eq!(timer, state(0, false, false));
    }

    #[test]
    fn toggle_on_standby_is_noop() {
        let mut timer = TimerState::new();
        timer.toggle_activation();
        assert_eq!(timer, TimerState::new());
        timer.toggle_activation();
        assert_eq!(timer, TimerState::new());
    }

    #[test]
    fn toggle_starts_and_pauses() {
        let mut timer = state(30, false, false);
        timer.toggle_activation();
        assert_eq!(timer, state(30, true, false));
        timer.toggle_activation();
        assert_eq!(timer, state(30, false, false));
    }

    #[test]
    fn toggle_while_alarming_only_dismisses() {
        let mut timer = state(0, false, true);
        timer.toggle_activation();
        assert_eq!(timer, state(0, false, false));
    }

    #[test]
    fn reset_from_every_phase() {
        for mut timer in [
            state(0, false, false),
            state(90, false, false),
            state(90, true, false),
            state(0, false, true),
        ] {
            timer.reset();
            assert_eq!(timer, state(0, false, false));
        }
    }

    #[test]
    fn tick_counts_down_then_alarms() {
        let mut timer = state(3, true, false);
        assert_eq!(timer.tick(), TickOutcome::Counting(2));
        assert_eq!(timer, state(2, true, false));
        assert_eq!(timer.tick(), TickOutcome::Counting(1));
        assert_eq!(timer.tick(), TickOutcome::Expired);
        assert_eq!(timer, state(0, false, true));
    }

    #[test]
    fn tick_is_ignored_when_inactive() {
        let mut timer = state(5, false, false);
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer, state(5, false, false));
    }

    #[test]
    fn phase_follows_flags() {
        assert_eq!(state(0, false, false).phase(), Phase::Standby);
        assert_eq!(state(10, false, false).phase(), Phase::Ready);
        assert_eq!(state(10, true, false).phase(), Phase::Running);
        assert_eq!(state(0, false, true).phase(), Phase::Alarming);
    }
}
