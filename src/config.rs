//! Configuration and CLI argument handling

use std::time::Duration;

use anyhow::ensure;
use clap::Parser;

/// Largest notch the CLI accepts: one day
const MAX_SECONDS_PER_TICK: u64 = 86_400;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "chronos-dial")]
#[command(about = "A rotary-dial countdown timer driven by pointer events on stdin")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Edge length of the dial's square bounding box, in pixels
    #[arg(long, default_value = "160")]
    pub size: f64,

    /// Hold duration that turns a press into a reset, in milliseconds
    #[arg(long, default_value = "800")]
    pub long_press_ms: u64,

    /// Angular movement of a single move event that turns a press into a drag, in degrees
    #[arg(long, default_value = "2.0")]
    pub drag_threshold: f64,

    /// Rotation needed for one notch, in degrees
    #[arg(long, default_value = "15.0")]
    pub degrees_per_tick: f64,

    /// Seconds added or removed per notch
    #[arg(long, default_value = "10")]
    pub seconds_per_tick: i64,

    /// Countdown cadence in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Alarm chime repeat period in milliseconds
    #[arg(long, default_value = "1500")]
    pub alarm_repeat_ms: u64,

    /// Disable haptic pulses
    #[arg(long)]
    pub no_haptics: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Reject values that would make the dial unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.size.is_finite() && self.size > 0.0,
            "--size must be positive, got {}",
            self.size
        );
        ensure!(
            self.degrees_per_tick.is_finite() && self.degrees_per_tick > 0.0,
            "--degrees-per-tick must be positive, got {}",
            self.degrees_per_tick
        );
        ensure!(
            self.drag_threshold.is_finite() && self.drag_threshold >= 0.0,
            "--drag-threshold must not be negative, got {}",
            self.drag_threshold
        );
        ensure!(
            (1..=MAX_SECONDS_PER_TICK).contains(&self.seconds_per_tick.unsigned_abs()),
            "--seconds-per-tick must be between 1 and {} in magnitude, got {}",
            MAX_SECONDS_PER_TICK,
            self.seconds_per_tick
        );
        ensure!(self.tick_ms > 0, "--tick-ms must be positive");
        ensure!(self.alarm_repeat_ms > 0, "--alarm-repeat-ms must be positive");
        Ok(())
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Gesture thresholds derived from the CLI flags
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            long_press: Duration::from_millis(self.long_press_ms),
            drag_threshold_deg: self.drag_threshold,
            degrees_per_tick: self.degrees_per_tick,
            seconds_per_tick: self.seconds_per_tick,
        }
    }

    /// Scheduler cadences derived from the CLI flags
    pub fn cadence(&self) -> CadenceConfig {
        CadenceConfig {
            tick: Duration::from_millis(self.tick_ms),
            alarm_repeat: Duration::from_millis(self.alarm_repeat_ms),
        }
    }
}

/// Thresholds used by the gesture recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub long_press: Duration,
    pub drag_threshold_deg: f64,
    pub degrees_per_tick: f64,
    pub seconds_per_tick: i64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(800),
            drag_threshold_deg: 2.0,
            degrees_per_tick: 15.0,
            seconds_per_tick: 10,
        }
    }
}

/// Periods of the countdown and alarm cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceConfig {
    pub tick: Duration,
    pub alarm_repeat: Duration,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            alarm_repeat: Duration::from_millis(1500),
        }
    }
}
