//! The dial timer controller
//!
//! Owns the timer state, the current gesture session and the cadence
//! handles. Pointer events and timer firings are applied one at a time by
//! the owning loop; after each one the cadences are reconciled with the new
//! state and a frame is published.

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::{timer_state::TickOutcome, TimerState};
use crate::{
    config::CadenceConfig,
    display::{DialView, DisplayFrame},
    gesture::{ContactPhase, GestureRecognizer, GestureSession, Intent},
    input::PointerEvent,
    services::{Haptics, LazyTone},
    tasks::scheduler::{Scheduler, TimerFired, TimerHandle, TimerKind},
};

pub struct DialTimer {
    timer: TimerState,
    recognizer: GestureRecognizer,
    cadence: CadenceConfig,
    scheduler: Scheduler,
    /// Present only while a contact is down
    session: Option<GestureSession>,
    /// Held while running
    countdown: Option<TimerHandle>,
    /// Held while alarming
    alarm_repeat: Option<TimerHandle>,
    tone: LazyTone,
    haptics: Option<Box<dyn Haptics>>,
    dial_rotation: f64,
    last_intent: Option<Intent>,
    last_intent_time: Option<DateTime<Utc>>,
    frame_tx: watch::Sender<DisplayFrame>,
    /// Keep the receiver alive to prevent channel closure
    _frame_rx: watch::Receiver<DisplayFrame>,
    /// Every frame in order, for consumers that must not miss any
    frame_stream: Option<mpsc::UnboundedSender<DisplayFrame>>,
}

impl DialTimer {
    pub fn new(
        recognizer: GestureRecognizer,
        cadence: CadenceConfig,
        scheduler: Scheduler,
        tone: LazyTone,
        haptics: Option<Box<dyn Haptics>>,
    ) -> Self {
        let (frame_tx, frame_rx) = watch::channel(DisplayFrame::default());

        Self {
            timer: TimerState::new(),
            recognizer,
            cadence,
            scheduler,
            session: None,
            countdown: None,
            alarm_repeat: None,
            tone,
            haptics,
            dial_rotation: 0.0,
            last_intent: None,
            last_intent_time: None,
            frame_tx,
            _frame_rx: frame_rx,
            frame_stream: None,
        }
    }

    /// Watch the latest frame; intermediate frames may be skipped
    pub fn subscribe(&self) -> watch::Receiver<DisplayFrame> {
        self.frame_tx.subscribe()
    }

    /// Receive every changed frame in order. Replaces any earlier stream.
    pub fn frame_stream(&mut self) -> mpsc::UnboundedReceiver<DisplayFrame> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.frame_stream = Some(tx);
        rx
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer
    }

    pub fn contact_phase(&self) -> Option<ContactPhase> {
        self.session.as_ref().map(GestureSession::phase)
    }

    /// Nothing is pending: no contact, no countdown, no alarm
    pub fn is_idle(&self) -> bool {
        self.session.is_none() && self.countdown.is_none() && self.alarm_repeat.is_none()
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn is_chiming(&self) -> bool {
        self.alarm_repeat.is_some()
    }

    pub fn tone_acquired(&self) -> bool {
        self.tone.is_acquired()
    }

    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::render(&self.timer, self.dial_view(), self.last_intent, self.last_intent_time)
    }

    /// Feed a raw pointer event, returning the intent it produced
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Intent> {
        let intent = match event {
            PointerEvent::Down(point) => {
                if self.session.is_some() {
                    debug!("Ignoring extra contact, one is already active");
                    return None;
                }
                self.session = Some(self.recognizer.begin(point, &mut self.scheduler));
                None
            }
            PointerEvent::Move(point) => {
                let session = self.session.as_mut()?;
                let motion = self.recognizer.moved(session, point);
                self.dial_rotation += motion.delta_degrees;
                motion.intent
            }
            PointerEvent::Up => {
                let session = self.session.take()?;
                self.recognizer.released(session)
            }
            PointerEvent::Cancel => {
                let session = self.session.take()?;
                self.recognizer.cancelled(session);
                None
            }
        };

        if let Some(intent) = intent {
            self.apply_intent(intent);
        } else {
            self.publish();
        }
        intent
    }

    /// Route a timer firing to whoever holds its handle. Firings from
    /// cancelled handles are dropped.
    pub fn handle_timer(&mut self, fired: TimerFired) -> Option<Intent> {
        match fired.kind {
            TimerKind::LongPress => {
                let session = self.session.as_mut()?;
                let intent = self.recognizer.long_press_elapsed(session, &fired);
                match intent {
                    Some(intent) => self.apply_intent(intent),
                    None => debug!("Dropping stale long-press firing #{}", fired.id),
                }
                intent
            }
            TimerKind::Countdown => {
                if !self.countdown.as_ref().is_some_and(|handle| handle.owns(&fired)) {
                    debug!("Dropping stale countdown firing #{}", fired.id);
                    return None;
                }
                match self.timer.tick() {
                    TickOutcome::Counting(remaining) => debug!("Countdown at {}s", remaining),
                    TickOutcome::Expired => info!("Countdown finished"),
                    TickOutcome::Idle => warn!("Countdown fired while timer inactive"),
                }
                self.sync_cadences();
                self.publish();
                None
            }
            TimerKind::AlarmRepeat => {
                if !self.alarm_repeat.as_ref().is_some_and(|handle| handle.owns(&fired)) {
                    debug!("Dropping stale alarm firing #{}", fired.id);
                    return None;
                }
                self.tone.play();
                None
            }
        }
    }

    /// Apply an intent to the timer state
    pub fn apply_intent(&mut self, intent: Intent) {
        debug!("Applying intent {:?}", intent);

        if let Some(haptics) = self.haptics.as_mut() {
            haptics.pulse(intent.haptic_pulse());
        }
        self.tone.acquire();
        self.last_intent = Some(intent);
        self.last_intent_time = Some(Utc::now());

        match intent {
            Intent::Rotate(seconds) => self.timer.adjust_duration(seconds),
            Intent::Tap => self.timer.toggle_activation(),
            Intent::Reset => self.timer.reset(),
        }

        self.sync_cadences();
        self.publish();
    }

    /// Start or cancel the countdown and alarm cadences to match the state
    fn sync_cadences(&mut self) {
        if self.timer.is_active {
            if self.countdown.is_none() {
                debug!("Starting countdown cadence");
                self.countdown = Some(self.scheduler.repeating(
                    TimerKind::Countdown,
                    self.cadence.tick,
                    self.cadence.tick,
                ));
            }
        } else if let Some(handle) = self.countdown.take() {
            debug!("Stopping countdown cadence");
            handle.cancel();
        }

        if self.timer.is_alarming {
            if self.alarm_repeat.is_none() {
                info!("Alarm sounding every {:?}", self.cadence.alarm_repeat);
                self.alarm_repeat = Some(self.scheduler.repeating(
                    TimerKind::AlarmRepeat,
                    std::time::Duration::ZERO,
                    self.cadence.alarm_repeat,
                ));
            }
        } else if let Some(handle) = self.alarm_repeat.take() {
            info!("Alarm silenced");
            handle.cancel();
        }
    }

    fn dial_view(&self) -> DialView {
        DialView {
            rotation_degrees: self.dial_rotation,
            lit: self.timer.is_active || self.timer.is_alarming,
            pressed: matches!(
                self.contact_phase(),
                Some(ContactPhase::Pressing | ContactPhase::Dragging)
            ),
        }
    }

    fn publish(&mut self) {
        let frame = self.frame();
        let changed = self.frame_tx.send_if_modified(|current| {
            if *current == frame {
                false
            } else {
                *current = frame.clone();
                true
            }
        });

        if !changed {
            return;
        }
        if let Some(stream) = &self.frame_stream {
            if stream.send(frame).is_err() {
                debug!("Frame stream receiver gone, dropping it");
                self.frame_stream = None;
            }
        }
    }
}
