//! Classifies pointer contacts on the dial into intents

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    geometry::{angle_delta, DialBounds, Point},
    session::{ContactPhase, GestureSession},
};
use crate::{
    config::GestureConfig,
    tasks::scheduler::{Scheduler, TimerFired, TimerKind},
};

/// Slack applied when quantizing accumulated rotation into notches
const ANGLE_EPSILON_DEG: f64 = 1e-6;

/// Discrete user intent produced by the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "intent", content = "seconds")]
pub enum Intent {
    /// Change the duration by a signed number of seconds
    Rotate(i64),
    /// Short press: start, pause or dismiss
    Tap,
    /// Long press: back to standby
    Reset,
}

impl Intent {
    /// Haptic pulse that acknowledges this intent
    pub fn haptic_pulse(&self) -> Duration {
        match self {
            Intent::Rotate(_) => Duration::from_millis(10),
            Intent::Tap => Duration::from_millis(20),
            Intent::Reset => Duration::from_millis(50),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Rotate(_) => "rotate",
            Intent::Tap => "tap",
            Intent::Reset => "reset",
        }
    }
}

/// Result of a single move event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Raw (unquantized) rotation of this move, in degrees
    pub delta_degrees: f64,
    pub intent: Option<Intent>,
}

impl Motion {
    fn still() -> Self {
        Self { delta_degrees: 0.0, intent: None }
    }
}

/// Stateless classifier; all per-contact state lives in [`GestureSession`]
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    bounds: DialBounds,
    config: GestureConfig,
}

impl GestureRecognizer {
    pub fn new(bounds: DialBounds, config: GestureConfig) -> Self {
        Self { bounds, config }
    }

    pub fn bounds(&self) -> DialBounds {
        self.bounds
    }

    /// Start a contact and arm its long-press deferral
    pub fn begin(&self, point: Point, scheduler: &mut Scheduler) -> GestureSession {
        let angle = self.bounds.angle_of(point);
        let long_press = scheduler.once(TimerKind::LongPress, self.config.long_press);
        debug!("Contact started at {:.1}°", angle);
        GestureSession::new(angle, Some(long_press))
    }

    /// Track a move of the contact, emitting a rotation once whole notches
    /// have accumulated
    pub fn moved(&self, session: &mut GestureSession, point: Point) -> Motion {
        if session.phase == ContactPhase::LongPressed {
            return Motion::still();
        }

        let current = self.bounds.angle_of(point);
        let delta = angle_delta(session.last_angle, current);

        if session.phase == ContactPhase::Pressing && delta.abs() > self.config.drag_threshold_deg {
            session.cancel_long_press();
            session.phase = ContactPhase::Dragging;
            debug!("Contact promoted to drag ({:.1}° step)", delta);
        }

        session.accumulated_delta += delta;
        session.last_angle = current;

        let ticks = whole_ticks(session.accumulated_delta, self.config.degrees_per_tick);
        let intent = if ticks != 0 {
            session.accumulated_delta -= ticks as f64 * self.config.degrees_per_tick;
            Some(Intent::Rotate(ticks.saturating_mul(self.config.seconds_per_tick)))
        } else {
            None
        };

        Motion { delta_degrees: delta, intent }
    }

    /// The long-press deferral elapsed. Returns a reset when `fired` belongs
    /// to this contact and it has not turned into a drag.
    pub fn long_press_elapsed(
        &self,
        session: &mut GestureSession,
        fired: &TimerFired,
    ) -> Option<Intent> {
        if !session.owns_long_press(fired) {
            return None;
        }

        session.pending_long_press = None;
        session.phase = ContactPhase::LongPressed;
        info!("Long press detected");
        Some(Intent::Reset)
    }

    /// Finish a contact. Taps only come from presses that neither dragged
    /// nor outlived the long-press threshold.
    pub fn released(&self, mut session: GestureSession) -> Option<Intent> {
        let was_pending = session.cancel_long_press();
        if was_pending && !session.is_dragging() {
            debug!("Contact released as tap");
            Some(Intent::Tap)
        } else {
            debug!("Contact released ({:?})", session.phase);
            None
        }
    }

    /// Abandon a contact without emitting anything
    pub fn cancelled(&self, session: GestureSession) {
        debug!("Contact cancelled ({:?})", session.phase);
    }
}

/// Whole notches contained in `accumulated`, rounded toward zero
fn whole_ticks(accumulated: f64, degrees_per_tick: f64) -> i64 {
    let magnitude = ((accumulated.abs() + ANGLE_EPSILON_DEG) / degrees_per_tick).floor();
    magnitude.copysign(accumulated) as i64
}
