//! Per-contact gesture state

use crate::tasks::scheduler::{TimerFired, TimerHandle};

/// Where a contact is in its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    /// Down, not yet moved past the drag threshold
    Pressing,
    /// Moved past the drag threshold; can no longer tap or long-press
    Dragging,
    /// Long press fired; the rest of the contact is inert
    LongPressed,
}

/// State of one continuous pointer contact. Created on contact start and
/// consumed on release or cancellation; the pending long-press timer is
/// cancelled with it.
#[derive(Debug)]
pub struct GestureSession {
    pub(crate) origin_angle: f64,
    pub(crate) last_angle: f64,
    pub(crate) accumulated_delta: f64,
    pub(crate) phase: ContactPhase,
    pub(crate) pending_long_press: Option<TimerHandle>,
}

impl GestureSession {
    pub(crate) fn new(angle: f64, pending_long_press: Option<TimerHandle>) -> Self {
        Self {
            origin_angle: angle,
            last_angle: angle,
            accumulated_delta: 0.0,
            phase: ContactPhase::Pressing,
            pending_long_press,
        }
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn origin_angle(&self) -> f64 {
        self.origin_angle
    }

    /// Rotation not yet converted into notches, in degrees
    pub fn accumulated_delta(&self) -> f64 {
        self.accumulated_delta
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == ContactPhase::Dragging
    }

    pub fn long_press_pending(&self) -> bool {
        self.pending_long_press.is_some()
    }

    /// Whether a timer firing is this contact's long-press deferral
    pub fn owns_long_press(&self, fired: &TimerFired) -> bool {
        self.pending_long_press
            .as_ref()
            .is_some_and(|handle| handle.owns(fired))
    }

    /// Drop the long-press deferral, returning whether one was pending
    pub(crate) fn cancel_long_press(&mut self) -> bool {
        match self.pending_long_press.take() {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }
}
